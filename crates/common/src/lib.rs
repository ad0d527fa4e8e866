//! Helpers shared by the catalog binaries.

pub mod utils;
