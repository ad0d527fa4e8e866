use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::ids::TeamId;
use crate::validation;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(name: &str) -> Result<Self, ModelError> {
        Ok(Self { id: TeamId::generate(), name: validation::required_name("team name", name)? })
    }
}
