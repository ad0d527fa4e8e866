//! Authorization rules for catalog mutations.
//!
//! Pure functions over `(actor, action)`. Nothing is cached: callers evaluate
//! the policy at the point of mutation, against the records as they are now.
//!
//! Precedence:
//! 1. no actor: denied (`Unauthenticated`)
//! 2. admin: every mutation allowed
//! 3. service edit/delete: owner only
//! 4. user role/team reassignment: admin only
//! 5. team create/delete: admin only
//! 6. service create: any signed-in user
//! 7. profile update: the user themselves

use models::{AppService, Team, User};

use crate::errors::ServiceError;

/// A mutation together with the record it targets.
#[derive(Clone, Copy, Debug)]
pub enum Action<'a> {
    CreateService,
    EditService(&'a AppService),
    DeleteService(&'a AppService),
    /// Role or team reassignment of another user.
    AssignUser(&'a User),
    CreateTeam,
    DeleteTeam(&'a Team),
    UpdateProfile(&'a User),
}

/// A record the presentation layer may offer edit affordances for.
#[derive(Clone, Copy, Debug)]
pub enum Target<'a> {
    Service(&'a AppService),
    User(&'a User),
    Team(&'a Team),
}

/// Rule 1 on its own: resolve the acting user or fail.
pub fn require_actor(actor: Option<&User>) -> Result<&User, ServiceError> {
    actor.ok_or(ServiceError::Unauthenticated)
}

/// Decide whether `actor` may perform `action`.
pub fn authorize(actor: Option<&User>, action: Action<'_>) -> Result<(), ServiceError> {
    let actor = require_actor(actor)?;
    if actor.is_admin() {
        return Ok(());
    }
    match action {
        Action::EditService(service) | Action::DeleteService(service) => {
            if service.owner_id == actor.id {
                Ok(())
            } else {
                Err(ServiceError::unauthorized("only the owner or an admin may change this service"))
            }
        }
        Action::AssignUser(_) => Err(ServiceError::unauthorized("only an admin may reassign users")),
        Action::CreateTeam | Action::DeleteTeam(_) => Err(ServiceError::unauthorized("only an admin may manage teams")),
        Action::CreateService => Ok(()),
        Action::UpdateProfile(user) => {
            if user.id == actor.id {
                Ok(())
            } else {
                Err(ServiceError::unauthorized("users may only update their own profile"))
            }
        }
    }
}

pub fn is_allowed(actor: Option<&User>, action: Action<'_>) -> bool {
    authorize(actor, action).is_ok()
}

/// Advisory check for showing edit/delete affordances. Mutations re-check
/// through [`authorize`].
pub fn can_edit(actor: Option<&User>, target: Target<'_>) -> bool {
    let action = match target {
        Target::Service(service) => Action::EditService(service),
        Target::User(user) if actor.is_some_and(|a| a.id == user.id) => Action::UpdateProfile(user),
        Target::User(user) => Action::AssignUser(user),
        Target::Team(team) => Action::DeleteTeam(team),
    };
    is_allowed(actor, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Role, TeamId};

    struct Fixture {
        alice: User,
        bob: User,
        charlie: User,
        team: Team,
        billing: AppService,
    }

    fn fixture() -> Fixture {
        let team = Team::new("Platform Engineering").unwrap();
        let alice = User::new("Alice", Role::Admin, None).unwrap();
        let bob = User::new("Bob", Role::User, Some(team.id)).unwrap();
        let charlie = User::new("Charlie", Role::User, Some(TeamId::generate())).unwrap();
        let billing = AppService::new("Billing", bob.id, team.id, None, None).unwrap();
        Fixture { alice, bob, charlie, team, billing }
    }

    #[test]
    fn anonymous_is_denied_everything() {
        let f = fixture();
        let actions = [
            Action::CreateService,
            Action::EditService(&f.billing),
            Action::DeleteService(&f.billing),
            Action::AssignUser(&f.bob),
            Action::CreateTeam,
            Action::DeleteTeam(&f.team),
            Action::UpdateProfile(&f.bob),
        ];
        for action in actions {
            assert_eq!(authorize(None, action).unwrap_err(), ServiceError::Unauthenticated);
        }
    }

    #[test]
    fn admin_is_allowed_everything() {
        let f = fixture();
        let admin = Some(&f.alice);
        assert!(is_allowed(admin, Action::EditService(&f.billing)));
        assert!(is_allowed(admin, Action::DeleteService(&f.billing)));
        assert!(is_allowed(admin, Action::AssignUser(&f.bob)));
        assert!(is_allowed(admin, Action::CreateTeam));
        assert!(is_allowed(admin, Action::DeleteTeam(&f.team)));
        assert!(is_allowed(admin, Action::UpdateProfile(&f.bob)));
    }

    #[test]
    fn only_owner_may_change_a_service() {
        let f = fixture();
        assert!(is_allowed(Some(&f.bob), Action::EditService(&f.billing)));
        assert!(is_allowed(Some(&f.bob), Action::DeleteService(&f.billing)));
        assert!(matches!(
            authorize(Some(&f.charlie), Action::EditService(&f.billing)),
            Err(ServiceError::Unauthorized(_))
        ));
        assert!(!is_allowed(Some(&f.charlie), Action::DeleteService(&f.billing)));
    }

    #[test]
    fn members_cannot_manage_teams_or_users() {
        let f = fixture();
        assert!(!is_allowed(Some(&f.bob), Action::CreateTeam));
        assert!(!is_allowed(Some(&f.bob), Action::DeleteTeam(&f.team)));
        assert!(!is_allowed(Some(&f.bob), Action::AssignUser(&f.bob)));
        assert!(!is_allowed(Some(&f.bob), Action::AssignUser(&f.charlie)));
    }

    #[test]
    fn members_may_create_services_and_edit_themselves() {
        let f = fixture();
        assert!(is_allowed(Some(&f.charlie), Action::CreateService));
        assert!(is_allowed(Some(&f.charlie), Action::UpdateProfile(&f.charlie)));
        assert!(!is_allowed(Some(&f.charlie), Action::UpdateProfile(&f.bob)));
    }

    #[test]
    fn can_edit_follows_the_rules() {
        let f = fixture();
        assert!(can_edit(Some(&f.bob), Target::Service(&f.billing)));
        assert!(!can_edit(Some(&f.charlie), Target::Service(&f.billing)));
        assert!(can_edit(Some(&f.alice), Target::Service(&f.billing)));
        assert!(can_edit(Some(&f.bob), Target::User(&f.bob)));
        assert!(!can_edit(Some(&f.bob), Target::User(&f.charlie)));
        assert!(!can_edit(Some(&f.bob), Target::Team(&f.team)));
        assert!(can_edit(Some(&f.alice), Target::Team(&f.team)));
        assert!(!can_edit(None, Target::Service(&f.billing)));
    }
}
