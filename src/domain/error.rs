use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("validation failed: {message}")]
    Validation { message: String },
    #[error("unknown platform `{name}`")]
    UnknownPlatform { name: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unknown_platform(name: impl Into<String>) -> Self {
        Self::UnknownPlatform { name: name.into() }
    }
}
