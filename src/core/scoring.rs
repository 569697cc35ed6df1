use crate::models::{Competitor, CompetitorId, PairingRules};
use std::collections::HashMap;

/// Fights committed so far for each competitor within one pairing run
///
/// Counts only ever grow, and every update is visible to the rest of the
/// run immediately.
#[derive(Debug, Clone, Default)]
pub struct MatchCounts {
    counts: HashMap<CompetitorId, u32>,
}

impl MatchCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: CompetitorId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, id: CompetitorId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }
}

/// Score a candidate pairing (lower is better)
///
/// Returns `None` when the pair is ineligible: same competitor, same team,
/// either side already at the fight cap, or weights further apart than the
/// tolerance.
///
/// Scoring formula:
/// score = weight_diff
///       + (fights_a + fights_b) * load_penalty
///       - priority_bonus                          # either side is priority
///       - priority_exact_bonus                    # priority and weight_diff == 0
///       - exact_bonus                             # weight_diff == 0
pub fn score_pair(
    a: &Competitor,
    b: &Competitor,
    counts: &MatchCounts,
    rules: &PairingRules,
) -> Option<i64> {
    if a.id == b.id || a.team == b.team {
        return None;
    }

    let fights_a = counts.get(a.id);
    let fights_b = counts.get(b.id);
    if fights_a >= rules.max_fights_per_competitor || fights_b >= rules.max_fights_per_competitor {
        return None;
    }

    let diff = a.weight.abs_diff(b.weight);
    if diff > rules.weight_tolerance {
        return None;
    }

    let diff = i64::from(diff);
    let mut score = diff;
    score += i64::from(fights_a + fights_b) * rules.load_penalty;

    if a.priority || b.priority {
        score -= rules.priority_bonus;
        if diff == 0 {
            score -= rules.priority_exact_bonus;
        }
    }

    if diff == 0 {
        score -= rules.exact_bonus;
    }

    Some(score)
}
