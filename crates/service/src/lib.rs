//! Service layer for the catalog: the data-integrity and authorization core.
//! - `storage` owns users, teams and services and enforces structural invariants.
//! - `policy` decides who may perform which mutation.
//! - `auth` tracks the single signed-in user.
//! - `catalog` routes every mutation through the policy before it reaches the store.

pub mod errors;
pub mod storage;
pub mod policy;
pub mod auth;
pub mod catalog;

pub use auth::SessionManager;
pub use catalog::Catalog;
pub use errors::ServiceError;
pub use storage::EntityStore;
