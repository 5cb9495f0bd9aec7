#![deny(clippy::all, clippy::pedantic)]

pub mod backend;
pub mod batch;
pub mod cache;
pub mod draft;
pub mod generate;
pub mod insights;
