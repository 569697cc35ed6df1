// Core algorithm exports
pub mod matcher;
pub mod ordering;
pub mod scoring;

pub use matcher::Matcher;
pub use ordering::order_candidates;
pub use scoring::{score_pair, MatchCounts};
