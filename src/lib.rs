//! Weight Matcher - fight pairing service for team weigh-in events
//!
//! This library provides the pairing engine that turns a pool of registered
//! competitors into a deterministic list of fights, plus the storage and HTTP
//! layers that serve it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, order_candidates, score_pair, MatchCounts};
pub use crate::models::{Competitor, MatchRecord, MatchType, MatchSummary, PairingRules};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.rules(), &PairingRules::default());
        assert!(matcher.run(&[]).is_empty());
    }
}
