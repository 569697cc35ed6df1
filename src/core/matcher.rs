use crate::models::{Competitor, MatchRecord, MatchType, PairingRules};
use crate::core::{
    ordering::order_candidates,
    scoring::{score_pair, MatchCounts},
};

/// Fight pairing orchestrator - sweeps the ordered pool until it stops changing
///
/// # Algorithm
/// 1. Order competitors (priority first, then weight ascending)
/// 2. Sweep: each competitor under the cap takes its best-scoring eligible
///    opponent, and the fight is committed immediately
/// 3. Repeat sweeps until one produces no fight
///
/// Match counts are updated as soon as a fight is committed, so later
/// competitors in the same sweep see them. Only per-competitor counts are
/// tracked, not pair history, which means the same two competitors may be
/// paired twice.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: PairingRules,
}

impl Matcher {
    pub fn new(rules: PairingRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: PairingRules::default(),
        }
    }

    pub fn rules(&self) -> &PairingRules {
        &self.rules
    }

    /// Pair up a competitor snapshot
    ///
    /// Every call starts from empty match counts and fight number 1. The
    /// returned fights are in creation order.
    pub fn run(&self, competitors: &[Competitor]) -> Vec<MatchRecord> {
        let ordered = order_candidates(competitors);
        let mut counts = MatchCounts::new();
        let mut records = Vec::new();
        let mut fight_number = 1;
        let mut sweeps = 0;

        loop {
            sweeps += 1;
            let mut created = false;

            for &a in &ordered {
                if counts.get(a.id) >= self.rules.max_fights_per_competitor {
                    continue;
                }

                // Strict less-than: the first opponent in scan order wins ties
                let mut best: Option<(&Competitor, i64)> = None;
                for &b in &ordered {
                    if let Some(score) = score_pair(a, b, &counts, &self.rules) {
                        if best.map_or(true, |(_, best_score)| score < best_score) {
                            best = Some((b, score));
                        }
                    }
                }

                if let Some((b, score)) = best {
                    let record = MatchRecord {
                        fight_number,
                        competitor_a: a.id,
                        competitor_b: b.id,
                        weight_class: a.weight.max(b.weight),
                        match_type: MatchType::for_weights(a.weight, b.weight),
                    };

                    tracing::debug!(
                        "Fight {}: {} vs {} (class {}, {}, score {})",
                        fight_number,
                        a.id,
                        b.id,
                        record.weight_class,
                        record.match_type.as_str(),
                        score
                    );

                    records.push(record);
                    counts.increment(a.id);
                    counts.increment(b.id);
                    fight_number += 1;
                    created = true;
                }
            }

            if !created {
                break;
            }
        }

        tracing::info!(
            "Paired {} competitors into {} fights over {} sweeps",
            competitors.len(),
            records.len(),
            sweeps
        );

        records
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
