use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Minimum body length, in characters after trimming, accepted for generation.
pub const MIN_BODY_CHARS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }

    /// Checks the draft is ready to be sent for generation.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        let body = self.body.trim();
        if body.is_empty() {
            return Err(DomainError::validation("body must not be empty"));
        }
        if body.chars().count() < MIN_BODY_CHARS {
            return Err(DomainError::validation(format!(
                "body must be at least {MIN_BODY_CHARS} characters"
            )));
        }
        Ok(())
    }
}
