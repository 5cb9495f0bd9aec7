//! Notification collaborator: where user-visible failure messages go.

use std::sync::Mutex;

use tracing::error;

use crate::cache::mutex_lock;

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Routes notifications into the log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        error!("{message}");
    }
}

/// Keeps every notification in memory; handy for assertions and for
/// replaying messages after a command finishes.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        mutex_lock(&self.entries, "infra::http::notify", "entries").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        mutex_lock(&self.entries, "infra::http::notify", "notify").push(message.to_string());
    }
}
