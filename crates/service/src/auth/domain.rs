use serde::{Deserialize, Serialize};

use models::TeamId;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub team_id: TeamId,
}

/// Self-service profile changes. `team_id: None` clears the team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub team_id: Option<TeamId>,
}
