use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::ids::{ServiceId, TeamId, UserId};
use crate::validation;

/// An application service listed in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppService {
    pub id: ServiceId,
    pub name: String,
    pub owner_id: UserId,
    pub team_id: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

impl AppService {
    pub fn new(
        name: &str,
        owner_id: UserId,
        team_id: TeamId,
        documentation_url: Option<String>,
        repository_url: Option<String>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            id: ServiceId::generate(),
            name: validation::required_name("service name", name)?,
            owner_id,
            team_id,
            documentation_url: validation::optional_url(documentation_url),
            repository_url: validation::optional_url(repository_url),
        })
    }

    /// Case-insensitive substring match on the name; an empty term matches everything.
    /// The term is taken as typed, surrounding spaces included.
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}
