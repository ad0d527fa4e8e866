use tracing::warn;

use models::{AppService, ServiceId, Team, TeamId, User, UserId};

use crate::auth::domain::{ProfileUpdate, RegisterInput};
use crate::auth::SessionManager;
use crate::errors::ServiceError;
use crate::policy::{self, Action, Target};
use crate::storage::{EntityStore, NewService, ServicePatch, UserPatch};

/// Entry point for presentation code.
///
/// Every mutation takes the caller's session explicitly, resolves the actor
/// against the store, runs it through [`policy::authorize`] and only then
/// hands the request to the [`EntityStore`], which applies its own checks.
///
/// # Examples
/// ```
/// use service::{Catalog, SessionManager, ServiceError};
/// use service::storage::{seed, NewService, ServicePatch};
///
/// let mut catalog = Catalog::new(seed::demo_store().unwrap());
/// let mut session = SessionManager::new();
/// catalog.login(&mut session, "bob").unwrap();
///
/// let team = catalog.store().list_teams()[0].id;
/// let draft = NewService { name: "Billing".into(), team_id: Some(team), ..Default::default() };
/// let billing = catalog.create_service(&session, draft).unwrap();
/// assert_eq!(billing.owner_id, session.current_user_id().unwrap());
///
/// catalog.login(&mut session, "charlie").unwrap();
/// let patch = ServicePatch { name: Some("Payments".into()), ..Default::default() };
/// let denied = catalog.update_service(&session, billing.id, patch);
/// assert!(matches!(denied, Err(ServiceError::Unauthorized(_))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    store: EntityStore,
}

impl Catalog {
    pub fn new(store: EntityStore) -> Self { Self { store } }

    /// Read access to the underlying store. All reads are unrestricted.
    pub fn store(&self) -> &EntityStore { &self.store }

    pub fn into_store(self) -> EntityStore { self.store }

    pub fn current_user(&self, session: &SessionManager) -> Option<&User> {
        session.current_user(&self.store)
    }

    // ---- identity ----

    pub fn login(&self, session: &mut SessionManager, name: &str) -> Result<&User, ServiceError> {
        session.login(&self.store, name)
    }

    pub fn register(&mut self, session: &mut SessionManager, input: RegisterInput) -> Result<User, ServiceError> {
        session.register(&mut self.store, input)
    }

    pub fn logout(&self, session: &mut SessionManager) {
        session.logout();
    }

    pub fn update_profile(&mut self, session: &SessionManager, update: ProfileUpdate) -> Result<User, ServiceError> {
        session.update_profile(&mut self.store, update)
    }

    // ---- services ----

    /// Create a service; the owner defaults to the acting user.
    pub fn create_service(&mut self, session: &SessionManager, mut draft: NewService) -> Result<AppService, ServiceError> {
        let actor = self.current_user(session);
        self.check(actor, Action::CreateService)?;
        let actor_id = policy::require_actor(actor)?.id;
        draft.owner_id = draft.owner_id.or(Some(actor_id));
        self.store.create_service(draft)
    }

    pub fn update_service(&mut self, session: &SessionManager, id: ServiceId, patch: ServicePatch) -> Result<AppService, ServiceError> {
        let actor = policy::require_actor(self.current_user(session))?;
        let service = self.store.find_service_by_id(id).ok_or_else(|| ServiceError::not_found("service"))?;
        self.check(Some(actor), Action::EditService(service))?;
        self.store.update_service(id, patch)
    }

    pub fn delete_service(&mut self, session: &SessionManager, id: ServiceId) -> Result<(), ServiceError> {
        let actor = policy::require_actor(self.current_user(session))?;
        let service = self.store.find_service_by_id(id).ok_or_else(|| ServiceError::not_found("service"))?;
        self.check(Some(actor), Action::DeleteService(service))?;
        self.store.delete_service(id)
    }

    // ---- users ----

    /// Admin reassignment of another user's role, team or name.
    pub fn assign_user(&mut self, session: &SessionManager, id: UserId, patch: UserPatch) -> Result<User, ServiceError> {
        let actor = policy::require_actor(self.current_user(session))?;
        let target = self.store.find_user_by_id(id).ok_or_else(|| ServiceError::not_found("user"))?;
        self.check(Some(actor), Action::AssignUser(target))?;
        self.store.update_user(id, patch)
    }

    // ---- teams ----

    pub fn create_team(&mut self, session: &SessionManager, name: &str) -> Result<Team, ServiceError> {
        self.check(self.current_user(session), Action::CreateTeam)?;
        self.store.create_team(name)
    }

    pub fn delete_team(&mut self, session: &SessionManager, id: TeamId) -> Result<(), ServiceError> {
        let actor = policy::require_actor(self.current_user(session))?;
        let team = self.store.find_team_by_id(id).ok_or_else(|| ServiceError::not_found("team"))?;
        self.check(Some(actor), Action::DeleteTeam(team))?;
        self.store.delete_team(id)
    }

    /// Advisory: whether the session's user would be allowed to edit `target`.
    pub fn can_edit(&self, session: &SessionManager, target: Target<'_>) -> bool {
        policy::can_edit(self.current_user(session), target)
    }

    fn check(&self, actor: Option<&User>, action: Action<'_>) -> Result<(), ServiceError> {
        policy::authorize(actor, action).map_err(|e| {
            warn!(actor = ?actor.map(|a| a.id), action = ?action, error = %e, "mutation_denied");
            e
        })
    }
}
