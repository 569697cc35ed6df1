// Integration tests for Weight Matcher

use std::collections::HashMap;
use weight_matcher::core::Matcher;
use weight_matcher::models::{Competitor, MatchRecord, MatchSummary, MatchType, NewCompetitor};
use weight_matcher::services::Store;

const TEAMS: [&str; 5] = ["red", "blue", "green", "gold", "navy"];

fn competitor(id: u32, team: &str, weight: u16, priority: bool) -> Competitor {
    Competitor::new(id, &format!("Fighter {}", id), team, weight, priority)
}

/// A deterministic mixed pool: clustered weights, repeating teams, some priority
fn mixed_pool(size: u32) -> Vec<Competitor> {
    (1..=size)
        .map(|i| {
            let weight = 100 + ((i * 7) % 23) as u16;
            let team = TEAMS[(i as usize * 3) % TEAMS.len()];
            competitor(i, team, weight, i % 6 == 0)
        })
        .collect()
}

fn assert_invariants(competitors: &[Competitor], records: &[MatchRecord]) {
    let by_id: HashMap<u32, &Competitor> = competitors.iter().map(|c| (c.id, c)).collect();
    let mut appearances: HashMap<u32, u32> = HashMap::new();

    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.fight_number as usize, i + 1, "fight numbers must run 1..k");

        let a = by_id[&record.competitor_a];
        let b = by_id[&record.competitor_b];

        assert_ne!(a.id, b.id);
        assert_ne!(a.team, b.team);
        assert!(a.weight.abs_diff(b.weight) <= 3);
        assert_eq!(record.weight_class, a.weight.max(b.weight));
        assert_eq!(record.match_type == MatchType::Exact, a.weight == b.weight);

        *appearances.entry(a.id).or_insert(0) += 1;
        *appearances.entry(b.id).or_insert(0) += 1;
    }

    for (id, count) in appearances {
        assert!(count <= 2, "competitor {} appears in {} fights", id, count);
    }
}

#[test]
fn test_integration_mixed_pool_invariants() {
    let matcher = Matcher::with_default_rules();
    let competitors = mixed_pool(60);

    let records = matcher.run(&competitors);

    assert!(!records.is_empty());
    assert_invariants(&competitors, &records);
}

#[test]
fn test_deterministic_output() {
    let matcher = Matcher::with_default_rules();
    let competitors = mixed_pool(40);

    assert_eq!(matcher.run(&competitors), matcher.run(&competitors));
}

#[test]
fn test_exact_pair_and_isolated_competitor() {
    let matcher = Matcher::with_default_rules();
    let competitors = vec![
        competitor(1, "red", 100, false),
        competitor(2, "blue", 100, false),
        competitor(3, "green", 105, false),
    ];

    let records = matcher.run(&competitors);

    assert_eq!(
        records[0],
        MatchRecord {
            fight_number: 1,
            competitor_a: 1,
            competitor_b: 2,
            weight_class: 100,
            match_type: MatchType::Exact,
        }
    );
    // No pair history is kept, so B takes A again in the same sweep
    assert_eq!(records.len(), 2);
    assert_eq!((records[1].competitor_a, records[1].competitor_b), (2, 1));
    assert!(records.iter().all(|r| !r.involves(3)));
    assert_invariants(&competitors, &records);
}

#[test]
fn test_priority_takes_exact_partner() {
    let matcher = Matcher::with_default_rules();
    // The tolerance partner comes first in scan order; the exact one must still win
    let competitors = vec![
        competitor(1, "red", 150, true),
        competitor(2, "blue", 149, false),
        competitor(3, "green", 150, false),
    ];

    let records = matcher.run(&competitors);

    assert_eq!(records[0].competitor_a, 1);
    assert_eq!(records[0].competitor_b, 3);
    assert_eq!(records[0].match_type, MatchType::Exact);
}

#[test]
fn test_same_team_pair_is_empty() {
    let matcher = Matcher::with_default_rules();
    let competitors = vec![competitor(1, "red", 120, false), competitor(2, "red", 180, true)];

    assert!(matcher.run(&competitors).is_empty());
    assert!(matcher.run(&[]).is_empty());
}

#[test]
fn test_saturated_pool_respects_cap() {
    let matcher = Matcher::with_default_rules();
    let teams = [
        "red", "blue", "green", "gold", "navy", "pink", "cyan", "lime", "teal", "rose", "sky",
    ];
    let competitors: Vec<Competitor> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| competitor(i as u32 + 1, team, 150, false))
        .collect();

    let records = matcher.run(&competitors);

    // A chain through every competitor closes back onto the first one
    assert_eq!(records.len(), 11);
    assert_invariants(&competitors, &records);

    let summary = MatchSummary::from_records(&competitors, &records);
    assert_eq!(summary.exact_fights, 11);
    assert!(summary.unmatched_ids.is_empty());
}

#[test]
fn test_memory_store_replace_flow() {
    let store = Store::memory();
    let matcher = Matcher::with_default_rules();

    for (name, team, weight) in [("A", "red", 130), ("B", "blue", 131), ("C", "green", 133)] {
        tokio_test::block_on(store.create_competitor(NewCompetitor {
            name: name.to_string(),
            team: team.to_string(),
            weight,
            priority: false,
        }))
        .unwrap();
    }

    let competitors = tokio_test::block_on(store.list_competitors()).unwrap();
    let records = matcher.run(&competitors);
    let stored = tokio_test::block_on(store.replace_matches(records.clone())).unwrap();
    assert_eq!(stored.len(), records.len());

    // A second run replaces rather than appends
    tokio_test::block_on(store.replace_matches(matcher.run(&competitors))).unwrap();
    let joined = tokio_test::block_on(store.list_matches()).unwrap();
    assert_eq!(joined.len(), records.len());
    assert_eq!(joined[0].stored.id, 1);
}
