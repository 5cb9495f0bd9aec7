//! HTTP client for the content backend.
//!
//! Every transport or status failure is classified into an [`ApiErrorKind`]
//! here and reported to the [`Notifier`] before it reaches the caller. No
//! retries happen at this layer.

mod client;
mod endpoints;
mod error;
pub mod models;
mod notify;

pub use client::{ApiClient, ClientOptions};
pub use error::{ApiError, ApiErrorKind};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
