use models::{AppService, Team, User};

/// Owner label shown when a service's owner no longer resolves.
pub const UNKNOWN_OWNER: &str = "Unknown";
/// Team label shown when a service's team no longer resolves.
pub const UNASSIGNED_TEAM: &str = "Unassigned";

/// A service joined with its owner and team at read time.
///
/// `owner` / `team` are `None` for dangling references; that is not an error.
#[derive(Clone, Copy, Debug)]
pub struct ServiceDetails<'a> {
    pub service: &'a AppService,
    pub owner: Option<&'a User>,
    pub team: Option<&'a Team>,
}

impl<'a> ServiceDetails<'a> {
    pub fn owner_name(&self) -> &'a str {
        self.owner.map_or(UNKNOWN_OWNER, |u| u.name.as_str())
    }

    pub fn team_name(&self) -> &'a str {
        self.team.map_or(UNASSIGNED_TEAM, |t| t.name.as_str())
    }
}
