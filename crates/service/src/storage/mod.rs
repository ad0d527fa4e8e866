//! In-memory storage for the catalog.
//!
//! `Collection` keeps records in insertion order; `EntityStore` owns the three
//! collections and is the only place that mutates them.

pub mod collection;
pub mod details;
pub mod entity_store;
pub mod patch;
pub mod seed;

pub use details::ServiceDetails;
pub use entity_store::EntityStore;
pub use patch::{NewService, ServicePatch, UserPatch};
pub use seed::Dataset;
