//! Application services: the fan-out pipeline and the editor controller.

pub mod content_api;
pub mod editor;
pub mod fanout;

#[cfg(test)]
pub(crate) mod testing;
