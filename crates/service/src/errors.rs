use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("a user with this name already exists")]
    DuplicateName,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("team still has assigned users")]
    TeamInUse,
    #[error("no user is logged in")]
    Unauthenticated,
    #[error("not allowed: {0}")]
    Unauthorized(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn unauthorized(reason: &str) -> Self { Self::Unauthorized(reason.to_string()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::DuplicateName => 1001,
            ServiceError::InvalidInput(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::TeamInUse => 1004,
            ServiceError::Unauthenticated => 1101,
            ServiceError::Unauthorized(_) => 1102,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::InvalidInput(msg),
        }
    }
}
