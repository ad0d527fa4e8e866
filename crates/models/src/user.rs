use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::ids::{TeamId, UserId};
use crate::validation;

/// Role tag as shown to callers and stored in datasets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

/// Role together with team assignment. An admin carries no team, so an
/// admin with a team cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Admin,
    Member(Option<TeamId>),
}

impl Access {
    /// Combine a role with a requested team; the team is dropped for admins.
    pub fn from_parts(role: Role, team_id: Option<TeamId>) -> Self {
        match role {
            Role::Admin => Access::Admin,
            Role::User => Access::Member(team_id),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Access::Admin => Role::Admin,
            Access::Member(_) => Role::User,
        }
    }

    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            Access::Admin => None,
            Access::Member(team_id) => *team_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserRecord", into = "UserRecord")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub access: Access,
}

impl User {
    pub fn new(name: &str, role: Role, team_id: Option<TeamId>) -> Result<Self, ModelError> {
        Ok(Self {
            id: UserId::generate(),
            name: validation::required_name("user name", name)?,
            access: Access::from_parts(role, team_id),
        })
    }

    pub fn role(&self) -> Role {
        self.access.role()
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.access.team_id()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.access, Access::Admin)
    }

    /// Case-insensitive name match, as used for login and uniqueness.
    pub fn has_name(&self, name: &str) -> bool {
        validation::names_match(&self.name, name)
    }
}

/// Flat wire shape: `{ id, name, role, team_id? }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct UserRecord {
    id: UserId,
    name: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self { id: r.id, name: r.name, access: Access::from_parts(r.role, r.team_id) }
    }
}

impl From<User> for UserRecord {
    fn from(u: User) -> Self {
        Self { id: u.id, name: u.name, role: u.access.role(), team_id: u.access.team_id() }
    }
}
