//! Domain layer types and invariants.

pub mod draft;
pub mod error;
pub mod platform;
pub mod results;
pub mod summary;
