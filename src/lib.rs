//! Client-side orchestration for the Kusi content backend.
//!
//! The crate drives multi-platform generation, quality scoring and
//! humanization over HTTP, keeps the editor draft in a TTL cache, and
//! exposes all of it to the `kusi-cli` front end.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
