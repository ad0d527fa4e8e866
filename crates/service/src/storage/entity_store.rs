use tracing::{debug, info, warn};

use models::{validation, Access, AppService, Role, ServiceId, Team, TeamId, User, UserId};

use super::collection::Collection;
use super::details::ServiceDetails;
use super::patch::{NewService, ServicePatch, UserPatch};
use super::seed::Dataset;
use crate::errors::ServiceError;

/// Owner of the user, team and service collections.
///
/// Every mutation validates first and writes last, so a failed call leaves
/// the store untouched. Checks here do not depend on who is calling; role
/// checks live in [`crate::policy`].
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    users: Collection<User>,
    teams: Collection<Team>,
    services: Collection<AppService>,
}

impl EntityStore {
    pub fn new() -> Self { Self::default() }

    /// Build a store from a pre-seeded dataset, enforcing the same invariants
    /// as the individual create operations (except that team references are
    /// not required to resolve).
    pub fn from_dataset(dataset: Dataset) -> Result<Self, ServiceError> {
        let mut store = Self::new();
        for mut team in dataset.teams {
            team.name = validation::required_name("team name", &team.name)?;
            store.teams.insert(team)?;
        }
        for mut user in dataset.users {
            user.name = validation::required_name("user name", &user.name)?;
            store.ensure_name_available(&user.name, None)?;
            store.users.insert(user)?;
        }
        for mut service in dataset.services {
            service.name = validation::required_name("service name", &service.name)?;
            service.documentation_url = validation::optional_url(service.documentation_url);
            service.repository_url = validation::optional_url(service.repository_url);
            store.services.insert(service)?;
        }
        info!(
            users = store.users.len(),
            teams = store.teams.len(),
            services = store.services.len(),
            "dataset_loaded"
        );
        Ok(store)
    }

    // ---- users ----

    /// Create a user. Names are unique ignoring case; an admin gets no team.
    pub fn create_user(&mut self, name: &str, role: Role, team_id: Option<TeamId>) -> Result<User, ServiceError> {
        let user = User::new(name, role, team_id)?;
        self.ensure_name_available(&user.name, None)?;
        if let Some(team_id) = user.team_id() {
            self.ensure_team_exists(team_id)?;
        }
        self.users.insert(user.clone())?;
        info!(user_id = %user.id, name = %user.name, role = ?user.role(), "user_created");
        Ok(user)
    }

    /// Apply a patch to a user. When the resulting role is admin the team is
    /// cleared, whatever the patch asked for.
    pub fn update_user(&mut self, id: UserId, patch: UserPatch) -> Result<User, ServiceError> {
        let current = self.users.get(id).ok_or_else(|| ServiceError::not_found("user"))?;

        let name = match &patch.name {
            Some(raw) => {
                let name = validation::required_name("user name", raw)?;
                self.ensure_name_available(&name, Some(id))?;
                name
            }
            None => current.name.clone(),
        };

        let role = patch.role.unwrap_or_else(|| current.role());
        let team_id = match patch.team_id {
            Some(requested) => {
                if let (Role::User, Some(team_id)) = (role, requested) {
                    self.ensure_team_exists(team_id)?;
                }
                requested
            }
            None => current.team_id(),
        };
        let access = Access::from_parts(role, team_id);
        if role == Role::Admin && matches!(patch.team_id, Some(Some(_))) {
            debug!(user_id = %id, "team ignored for admin");
        }

        let user = self.users.get_mut(id).ok_or_else(|| ServiceError::not_found("user"))?;
        user.name = name;
        user.access = access;
        let updated = user.clone();
        info!(user_id = %id, name = %updated.name, role = ?updated.role(), "user_updated");
        Ok(updated)
    }

    pub fn list_users(&self) -> &[User] { self.users.as_slice() }

    pub fn find_user_by_id(&self, id: UserId) -> Option<&User> { self.users.get(id) }

    /// Case-insensitive lookup by display name.
    pub fn find_user_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_name(name))
    }

    // ---- teams ----

    pub fn create_team(&mut self, name: &str) -> Result<Team, ServiceError> {
        let team = Team::new(name)?;
        self.teams.insert(team.clone())?;
        info!(team_id = %team.id, name = %team.name, "team_created");
        Ok(team)
    }

    /// Delete a team that no user belongs to.
    pub fn delete_team(&mut self, id: TeamId) -> Result<(), ServiceError> {
        if !self.teams.contains(id) {
            return Err(ServiceError::not_found("team"));
        }
        let members = self.member_count(id);
        if members > 0 {
            warn!(team_id = %id, members, "team_delete_rejected");
            return Err(ServiceError::TeamInUse);
        }
        self.teams.remove(id);
        info!(team_id = %id, "team_deleted");
        Ok(())
    }

    pub fn list_teams(&self) -> &[Team] { self.teams.as_slice() }

    pub fn find_team_by_id(&self, id: TeamId) -> Option<&Team> { self.teams.get(id) }

    pub fn team_members(&self, id: TeamId) -> Vec<&User> {
        self.users.iter().filter(|u| u.team_id() == Some(id)).collect()
    }

    pub fn member_count(&self, id: TeamId) -> usize {
        self.users.iter().filter(|u| u.team_id() == Some(id)).count()
    }

    pub fn team_services(&self, id: TeamId) -> Vec<&AppService> {
        self.services.iter().filter(|s| s.team_id == id).collect()
    }

    // ---- services ----

    pub fn create_service(&mut self, input: NewService) -> Result<AppService, ServiceError> {
        let owner_id = input.owner_id.ok_or_else(|| ServiceError::InvalidInput("owner required".into()))?;
        let team_id = input.team_id.ok_or_else(|| ServiceError::InvalidInput("team required".into()))?;
        let service = AppService::new(&input.name, owner_id, team_id, input.documentation_url, input.repository_url)?;
        self.ensure_user_exists(owner_id)?;
        self.ensure_team_exists(team_id)?;

        self.services.insert(service.clone())?;
        info!(service_id = %service.id, name = %service.name, owner_id = %owner_id, team_id = %team_id, "service_created");
        Ok(service)
    }

    /// Apply a patch to a service. Owner and team references named by the
    /// patch must resolve; references the patch leaves alone are not re-checked.
    pub fn update_service(&mut self, id: ServiceId, patch: ServicePatch) -> Result<AppService, ServiceError> {
        if !self.services.contains(id) {
            return Err(ServiceError::not_found("service"));
        }
        let name = patch.name.as_deref().map(|raw| validation::required_name("service name", raw)).transpose()?;
        if let Some(owner_id) = patch.owner_id {
            self.ensure_user_exists(owner_id)?;
        }
        if let Some(team_id) = patch.team_id {
            self.ensure_team_exists(team_id)?;
        }

        let service = self.services.get_mut(id).ok_or_else(|| ServiceError::not_found("service"))?;
        if let Some(name) = name {
            service.name = name;
        }
        if let Some(owner_id) = patch.owner_id {
            service.owner_id = owner_id;
        }
        if let Some(team_id) = patch.team_id {
            service.team_id = team_id;
        }
        if let Some(url) = patch.documentation_url {
            service.documentation_url = validation::optional_url(url);
        }
        if let Some(url) = patch.repository_url {
            service.repository_url = validation::optional_url(url);
        }
        let updated = service.clone();
        info!(service_id = %id, name = %updated.name, "service_updated");
        Ok(updated)
    }

    pub fn delete_service(&mut self, id: ServiceId) -> Result<(), ServiceError> {
        self.services.remove(id).ok_or_else(|| ServiceError::not_found("service"))?;
        info!(service_id = %id, "service_deleted");
        Ok(())
    }

    pub fn list_services(&self) -> &[AppService] { self.services.as_slice() }

    pub fn find_service_by_id(&self, id: ServiceId) -> Option<&AppService> { self.services.get(id) }

    /// Services whose name contains `term`, ignoring case.
    pub fn search_services(&self, term: &str) -> Vec<&AppService> {
        self.services.iter().filter(|s| s.matches_search(term)).collect()
    }

    pub fn services_owned_by(&self, owner_id: UserId) -> Vec<&AppService> {
        self.services.iter().filter(|s| s.owner_id == owner_id).collect()
    }

    /// Join a service with its owner and team.
    pub fn service_details(&self, id: ServiceId) -> Option<ServiceDetails<'_>> {
        self.services.get(id).map(|s| self.join(s))
    }

    pub fn list_service_details(&self) -> Vec<ServiceDetails<'_>> {
        self.services.iter().map(|s| self.join(s)).collect()
    }

    fn join<'a>(&'a self, service: &'a AppService) -> ServiceDetails<'a> {
        ServiceDetails {
            service,
            owner: self.users.get(service.owner_id),
            team: self.teams.get(service.team_id),
        }
    }

    fn ensure_name_available(&self, name: &str, except: Option<UserId>) -> Result<(), ServiceError> {
        let taken = self.users.iter().any(|u| Some(u.id) != except && u.has_name(name));
        if taken {
            debug!(%name, "user name taken");
            return Err(ServiceError::DuplicateName);
        }
        Ok(())
    }

    fn ensure_user_exists(&self, id: UserId) -> Result<(), ServiceError> {
        if self.users.contains(id) { Ok(()) } else { Err(ServiceError::InvalidInput(format!("unknown user {id}"))) }
    }

    fn ensure_team_exists(&self, id: TeamId) -> Result<(), ServiceError> {
        if self.teams.contains(id) { Ok(()) } else { Err(ServiceError::InvalidInput(format!("unknown team {id}"))) }
    }
}
