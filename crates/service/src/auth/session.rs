use tracing::{debug, info, instrument};

use models::{Role, User, UserId};

use super::domain::{ProfileUpdate, RegisterInput};
use crate::errors::ServiceError;
use crate::policy::{self, Action};
use crate::storage::{EntityStore, UserPatch};

/// Tracks at most one signed-in user.
///
/// Holds the user's id only; [`SessionManager::current_user`] looks the
/// record up again on every call.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    current: Option<UserId>,
}

impl SessionManager {
    pub fn new() -> Self { Self::default() }

    pub fn current_user_id(&self) -> Option<UserId> { self.current }

    pub fn is_authenticated(&self) -> bool { self.current.is_some() }

    /// The signed-in user as currently stored.
    pub fn current_user<'s>(&self, store: &'s EntityStore) -> Option<&'s User> {
        self.current.and_then(|id| store.find_user_by_id(id))
    }

    /// Sign in by display name, ignoring case. On failure the session is left as it was.
    #[instrument(skip(self, store))]
    pub fn login<'s>(&mut self, store: &'s EntityStore, name: &str) -> Result<&'s User, ServiceError> {
        let Some(user) = store.find_user_by_name(name) else {
            debug!("no such user");
            return Err(ServiceError::not_found("user"));
        };
        self.current = Some(user.id);
        info!(user_id = %user.id, "user_logged_in");
        Ok(user)
    }

    /// Create a regular user on the given team and sign them in.
    #[instrument(skip(self, store, input), fields(name = %input.name, team_id = %input.team_id))]
    pub fn register(&mut self, store: &mut EntityStore, input: RegisterInput) -> Result<User, ServiceError> {
        let user = store.create_user(&input.name, Role::User, Some(input.team_id))?;
        self.current = Some(user.id);
        info!(user_id = %user.id, "user_registered");
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.current.take() {
            info!(user_id = %id, "user_logged_out");
        }
    }

    /// Update the signed-in user's name and team.
    ///
    /// Only a name collision with another user is rejected here; requiring a
    /// team for regular users is up to the caller. Admins stay team-less.
    #[instrument(skip(self, store, update), fields(name = %update.name))]
    pub fn update_profile(&self, store: &mut EntityStore, update: ProfileUpdate) -> Result<User, ServiceError> {
        let actor = self.current_user(store);
        let me = policy::require_actor(actor)?;
        policy::authorize(actor, Action::UpdateProfile(me))?;
        let id = me.id;

        let patch = UserPatch { name: Some(update.name), role: None, team_id: Some(update.team_id) };
        let user = store.update_user(id, patch)?;
        info!(user_id = %id, "profile_updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed::demo_store;

    #[test]
    fn login_is_case_insensitive() -> Result<(), anyhow::Error> {
        let store = demo_store()?;
        let mut session = SessionManager::new();

        let bob = session.login(&store, "bob")?;
        assert_eq!(bob.name, "Bob");
        assert_eq!(session.current_user(&store).map(|u| u.name.as_str()), Some("Bob"));
        Ok(())
    }

    #[test]
    fn failed_login_keeps_current_state() -> Result<(), anyhow::Error> {
        let store = demo_store()?;
        let mut session = SessionManager::new();
        assert!(matches!(session.login(&store, "mallory"), Err(ServiceError::NotFound(_))));
        assert!(!session.is_authenticated());

        session.login(&store, "Diana")?;
        assert!(session.login(&store, "mallory").is_err());
        assert_eq!(session.current_user(&store).unwrap().name, "Diana");
        Ok(())
    }

    #[test]
    fn register_signs_in_a_regular_user() -> Result<(), anyhow::Error> {
        let mut store = demo_store()?;
        let frontend = store.list_teams().iter().find(|t| t.name == "Frontend").unwrap().id;
        let mut session = SessionManager::new();

        let erin = session.register(&mut store, RegisterInput { name: "Erin".into(), team_id: frontend })?;
        assert_eq!(erin.role(), Role::User);
        assert_eq!(erin.team_id(), Some(frontend));
        assert_eq!(session.current_user_id(), Some(erin.id));
        assert_eq!(store.member_count(frontend), 1);
        Ok(())
    }

    #[test]
    fn register_with_taken_name_fails() -> Result<(), anyhow::Error> {
        let mut store = demo_store()?;
        let team = store.list_teams()[1].id;
        let mut session = SessionManager::new();

        let err = session.register(&mut store, RegisterInput { name: "ALICE".into(), team_id: team }).unwrap_err();
        assert_eq!(err, ServiceError::DuplicateName);
        assert!(!session.is_authenticated());
        assert_eq!(store.list_users().len(), 4);
        Ok(())
    }

    #[test]
    fn logout_is_unconditional() -> Result<(), anyhow::Error> {
        let store = demo_store()?;
        let mut session = SessionManager::new();
        session.logout();
        session.login(&store, "Charlie")?;
        session.logout();
        assert!(session.current_user(&store).is_none());
        Ok(())
    }

    #[test]
    fn profile_update_is_visible_through_the_session() -> Result<(), anyhow::Error> {
        let mut store = demo_store()?;
        let frontend = store.list_teams()[2].id;
        let mut session = SessionManager::new();
        session.login(&store, "bob")?;

        let updated = session.update_profile(&mut store, ProfileUpdate { name: "Robert".into(), team_id: Some(frontend) })?;
        assert_eq!(updated.name, "Robert");
        let current = session.current_user(&store).unwrap();
        assert_eq!(current.name, "Robert");
        assert_eq!(current.team_id(), Some(frontend));
        Ok(())
    }

    #[test]
    fn profile_update_rejects_names_of_other_users() -> Result<(), anyhow::Error> {
        let mut store = demo_store()?;
        let mut session = SessionManager::new();
        session.login(&store, "bob")?;

        let err = session.update_profile(&mut store, ProfileUpdate { name: "charlie".into(), team_id: None }).unwrap_err();
        assert_eq!(err, ServiceError::DuplicateName);
        // keeping one's own name with different casing is fine
        let same = session.update_profile(&mut store, ProfileUpdate { name: "BOB".into(), team_id: None })?;
        assert_eq!(same.name, "BOB");
        Ok(())
    }

    #[test]
    fn admin_profile_update_keeps_admin_teamless() -> Result<(), anyhow::Error> {
        let mut store = demo_store()?;
        let team = store.list_teams()[0].id;
        let mut session = SessionManager::new();
        session.login(&store, "alice")?;

        let alice = session.update_profile(&mut store, ProfileUpdate { name: "Alice".into(), team_id: Some(team) })?;
        assert!(alice.is_admin());
        assert_eq!(alice.team_id(), None);
        Ok(())
    }

    #[test]
    fn profile_update_requires_a_session() -> Result<(), anyhow::Error> {
        let mut store = demo_store()?;
        let session = SessionManager::new();
        let err = session.update_profile(&mut store, ProfileUpdate { name: "Ghost".into(), team_id: None }).unwrap_err();
        assert_eq!(err, ServiceError::Unauthenticated);
        Ok(())
    }
}
