//! Pre-seeded datasets: the built-in demo catalog and JSON dataset files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use models::{Access, AppService, ServiceId, Team, TeamId, User, UserId};

use super::entity_store::EntityStore;
use crate::errors::ServiceError;

/// Raw contents of a catalog, as read from a dataset file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub services: Vec<AppService>,
}

/// Read a JSON dataset file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, ServiceError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| ServiceError::InvalidInput(format!("cannot read {}: {e}", path.display())))?;
    let dataset: Dataset = serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::InvalidInput(format!("malformed dataset {}: {e}", path.display())))?;
    info!(path = %path.display(), "dataset_read");
    Ok(dataset)
}

/// The demo catalog: four users, three teams (Frontend has no members) and five services.
pub fn demo_dataset() -> Dataset {
    let platform = Team { id: TeamId::generate(), name: "Platform Engineering".into() };
    let data = Team { id: TeamId::generate(), name: "Data Science".into() };
    let frontend = Team { id: TeamId::generate(), name: "Frontend".into() };

    let user = |name: &str, access: Access| User { id: UserId::generate(), name: name.into(), access };
    let alice = user("Alice", Access::Admin);
    let bob = user("Bob", Access::Member(Some(platform.id)));
    let charlie = user("Charlie", Access::Member(Some(data.id)));
    let diana = user("Diana", Access::Member(Some(data.id)));

    let service = |name: &str, owner: &User, team: &Team, docs: Option<&str>, repo: Option<&str>| AppService {
        id: ServiceId::generate(),
        name: name.into(),
        owner_id: owner.id,
        team_id: team.id,
        documentation_url: docs.map(str::to_string),
        repository_url: repo.map(str::to_string),
    };
    let services = vec![
        service(
            "Authentication Service",
            &alice,
            &platform,
            Some("https://docs.auth.example.com"),
            Some("https://github.com/example/auth-service"),
        ),
        service("Billing API", &bob, &platform, None, Some("https://github.com/example/billing-api")),
        service(
            "ML Model Runner",
            &charlie,
            &data,
            Some("https://docs.ml.example.com"),
            Some("https://github.com/example/ml-runner"),
        ),
        service("Data Ingestion Pipeline", &diana, &data, None, None),
        service("Customer Dashboard", &alice, &frontend, None, Some("https://github.com/example/dashboard")),
    ];

    Dataset {
        teams: vec![platform, data, frontend],
        users: vec![alice, bob, charlie, diana],
        services,
    }
}

/// A store filled with [`demo_dataset`].
pub fn demo_store() -> Result<EntityStore, ServiceError> {
    EntityStore::from_dataset(demo_dataset())
}
