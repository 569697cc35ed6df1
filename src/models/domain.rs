use serde::{Deserialize, Serialize};

/// Store-assigned competitor identity
pub type CompetitorId = u32;

/// A registered competitor entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    #[serde(rename = "teamColor")]
    pub team: String,
    pub weight: u16,
    #[serde(rename = "isPriority", with = "priority_flag", default)]
    pub priority: bool,
}

impl Competitor {
    pub fn new(id: CompetitorId, name: &str, team: &str, weight: u16, priority: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            team: team.to_string(),
            weight,
            priority,
        }
    }
}

/// Competitor fields before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompetitor {
    pub name: String,
    pub team: String,
    pub weight: u16,
    pub priority: bool,
}

impl NewCompetitor {
    pub fn with_id(self, id: CompetitorId) -> Competitor {
        Competitor {
            id,
            name: self.name,
            team: self.team,
            weight: self.weight,
            priority: self.priority,
        }
    }
}

/// Kind of pairing a fight represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Tolerance,
}

impl MatchType {
    pub fn for_weights(a: u16, b: u16) -> Self {
        if a == b {
            MatchType::Exact
        } else {
            MatchType::Tolerance
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Tolerance => "tolerance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "exact" => Some(MatchType::Exact),
            "tolerance" => Some(MatchType::Tolerance),
            _ => None,
        }
    }
}

/// One fight produced by a pairing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "fightNumber")]
    pub fight_number: u32,
    #[serde(rename = "fighter1Id")]
    pub competitor_a: CompetitorId,
    #[serde(rename = "fighter2Id")]
    pub competitor_b: CompetitorId,
    #[serde(rename = "weightClass")]
    pub weight_class: u16,
    #[serde(rename = "matchType")]
    pub match_type: MatchType,
}

impl MatchRecord {
    pub fn involves(&self, id: CompetitorId) -> bool {
        self.competitor_a == id || self.competitor_b == id
    }
}

/// A fight as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMatch {
    pub id: u32,
    #[serde(flatten)]
    pub record: MatchRecord,
}

/// A stored fight joined with both competitors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWithCompetitors {
    #[serde(flatten)]
    pub stored: StoredMatch,
    #[serde(rename = "fighter1")]
    pub competitor_a: Competitor,
    #[serde(rename = "fighter2")]
    pub competitor_b: Competitor,
}

/// Aggregate view over one pairing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(rename = "totalFights")]
    pub total_fights: usize,
    #[serde(rename = "exactFights")]
    pub exact_fights: usize,
    #[serde(rename = "toleranceFights")]
    pub tolerance_fights: usize,
    #[serde(rename = "unmatchedIds")]
    pub unmatched_ids: Vec<CompetitorId>,
}

impl MatchSummary {
    /// Summarize `records` against the competitor snapshot they were built from
    pub fn from_records(competitors: &[Competitor], records: &[MatchRecord]) -> Self {
        let exact_fights = records
            .iter()
            .filter(|r| r.match_type == MatchType::Exact)
            .count();

        let unmatched_ids = competitors
            .iter()
            .filter(|c| !records.iter().any(|r| r.involves(c.id)))
            .map(|c| c.id)
            .collect();

        Self {
            total_fights: records.len(),
            exact_fights,
            tolerance_fights: records.len() - exact_fights,
            unmatched_ids,
        }
    }
}

/// Pairing constants
///
/// Defaults reproduce the reference pairing behavior exactly. Scores are
/// integers and lower is better. Ties always go to the first candidate in scan
/// order, including at a score of -1, which the default constants can never
/// produce but custom ones (e.g. `exact_bonus = 1`) can.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingRules {
    pub weight_tolerance: u16,
    pub max_fights_per_competitor: u32,
    pub load_penalty: i64,
    pub priority_bonus: i64,
    pub priority_exact_bonus: i64,
    pub exact_bonus: i64,
}

impl Default for PairingRules {
    fn default() -> Self {
        Self {
            weight_tolerance: 3,
            max_fights_per_competitor: 2,
            load_penalty: 10,
            priority_bonus: 200,
            priority_exact_bonus: 500,
            exact_bonus: 100,
        }
    }
}

/// `isPriority` travels as 0/1 on the wire; bools are accepted on input too
mod priority_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u8),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => Ok(b),
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Int(other) => Err(serde::de::Error::custom(format!(
                "isPriority must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_flag_wire_format() {
        let c = Competitor::new(1, "Widow", "red", 150, true);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["isPriority"], 1);
        assert_eq!(json["teamColor"], "red");

        let back: Competitor = serde_json::from_value(json).unwrap();
        assert!(back.priority);

        let from_bool: Competitor = serde_json::from_str(
            r#"{"id":2,"name":"B","teamColor":"blue","weight":120,"isPriority":false}"#,
        )
        .unwrap();
        assert!(!from_bool.priority);
    }

    #[test]
    fn test_priority_flag_rejects_out_of_range() {
        let result: Result<Competitor, _> = serde_json::from_str(
            r#"{"id":2,"name":"B","teamColor":"blue","weight":120,"isPriority":2}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_match_type_from_weights() {
        assert_eq!(MatchType::for_weights(150, 150), MatchType::Exact);
        assert_eq!(MatchType::for_weights(150, 152), MatchType::Tolerance);
        assert_eq!(MatchType::parse(MatchType::Tolerance.as_str()), Some(MatchType::Tolerance));
        assert_eq!(MatchType::parse("heavy"), None);
    }

    #[test]
    fn test_summary_counts_unmatched() {
        let competitors = vec![
            Competitor::new(1, "A", "red", 100, false),
            Competitor::new(2, "B", "blue", 100, false),
            Competitor::new(3, "C", "green", 105, false),
        ];
        let records = vec![MatchRecord {
            fight_number: 1,
            competitor_a: 1,
            competitor_b: 2,
            weight_class: 100,
            match_type: MatchType::Exact,
        }];

        let summary = MatchSummary::from_records(&competitors, &records);
        assert_eq!(summary.total_fights, 1);
        assert_eq!(summary.exact_fights, 1);
        assert_eq!(summary.tolerance_fights, 0);
        assert_eq!(summary.unmatched_ids, vec![3]);
    }
}
