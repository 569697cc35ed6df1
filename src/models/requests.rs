use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::NewCompetitor;

/// Request to register a competitor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompetitorRequest {
    #[validate(length(min = 1, max = 20, message = "Fighter name must be 1-20 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Team color must be 1-20 characters"))]
    #[serde(alias = "team_color", rename = "teamColor")]
    pub team_color: String,
    #[validate(range(min = 100, max = 999, message = "Weight must be exactly 3 digits (100-999)"))]
    pub weight: u32,
    #[validate(range(max = 1, message = "isPriority must be 0 or 1"))]
    #[serde(default, alias = "is_priority", rename = "isPriority")]
    pub is_priority: u8,
}

impl CreateCompetitorRequest {
    /// Convert a validated request into store input
    ///
    /// Callers must run `validate()` first; the weight cast relies on the range check.
    pub fn into_new_competitor(self) -> NewCompetitor {
        NewCompetitor {
            name: self.name,
            team: self.team_color,
            weight: self.weight as u16,
            priority: self.is_priority == 1,
        }
    }
}
