//! Auth module: the single-slot session and the inputs it accepts.
//!
//! The session stores only the signed-in user's id and resolves it against
//! the entity store on every read, so profile edits are visible immediately.

pub mod domain;
pub mod session;

pub use session::SessionManager;
