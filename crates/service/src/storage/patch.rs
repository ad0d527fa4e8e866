//! Mutation inputs for the entity store.
//!
//! Patch fields left as `None` keep the current value. Fields that can be
//! cleared use `Option<Option<_>>`, where `Some(None)` clears.

use serde::{Deserialize, Serialize};

use models::{AppService, Role, TeamId, UserId};

/// Changes to a user record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub team_id: Option<Option<TeamId>>,
}

/// Input for a new service. A missing owner or team is rejected by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewService {
    pub name: String,
    pub owner_id: Option<UserId>,
    pub team_id: Option<TeamId>,
    pub documentation_url: Option<String>,
    pub repository_url: Option<String>,
}

/// Changes to a service record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub owner_id: Option<UserId>,
    pub team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub documentation_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub repository_url: Option<Option<String>>,
}

impl From<&AppService> for ServicePatch {
    /// A patch that restates every field of the service.
    fn from(svc: &AppService) -> Self {
        Self {
            name: Some(svc.name.clone()),
            owner_id: Some(svc.owner_id),
            team_id: Some(svc.team_id),
            documentation_url: Some(svc.documentation_url.clone()),
            repository_url: Some(svc.repository_url.clone()),
        }
    }
}

/// Keeps "absent" and `null` apart: a missing field is `None` (keep),
/// an explicit `null` is `Some(None)` (clear).
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
