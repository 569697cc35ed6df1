use crate::models::Competitor;
use std::cmp::Reverse;

/// Order competitors for the pairing scan: priority entries first, then by
/// ascending weight.
///
/// The sort is stable, so competitors equal on both keys keep their input
/// order. Pairing tie-breaks depend on this order.
pub fn order_candidates(competitors: &[Competitor]) -> Vec<&Competitor> {
    let mut ordered: Vec<&Competitor> = competitors.iter().collect();
    ordered.sort_by_key(|c| (Reverse(c.priority), c.weight));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ordered: &[&Competitor]) -> Vec<u32> {
        ordered.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_priority_before_weight() {
        let competitors = vec![
            Competitor::new(1, "A", "red", 120, false),
            Competitor::new(2, "B", "blue", 300, true),
            Competitor::new(3, "C", "green", 110, false),
            Competitor::new(4, "D", "gold", 200, true),
        ];

        assert_eq!(ids(&order_candidates(&competitors)), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let competitors = vec![
            Competitor::new(7, "A", "red", 150, false),
            Competitor::new(3, "B", "blue", 150, false),
            Competitor::new(5, "C", "green", 150, false),
        ];

        assert_eq!(ids(&order_candidates(&competitors)), vec![7, 3, 5]);
    }

    #[test]
    fn test_empty() {
        assert!(order_candidates(&[]).is_empty());
    }
}
