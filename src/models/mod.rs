// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Competitor, CompetitorId, NewCompetitor, MatchType, MatchRecord, StoredMatch, MatchWithCompetitors, MatchSummary, PairingRules};
pub use requests::CreateCompetitorRequest;
pub use responses::{HealthResponse, ErrorResponse, MessageResponse};
