//! Entity definitions for the service catalog.
//! - `User`, `Team` and `AppService` records with typed identifiers.
//! - Record-level validation (names, optional URLs) shared by the service layer.

pub mod errors;
pub mod ids;
pub mod validation;
pub mod team;
pub mod user;
pub mod app_service;

pub use app_service::AppService;
pub use ids::{ServiceId, TeamId, UserId};
pub use team::Team;
pub use user::{Access, Role, User};
