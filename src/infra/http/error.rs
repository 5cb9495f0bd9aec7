use serde::Serialize;
use thiserror::Error;

/// Failure of a single backend request, classified at the client boundary.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },
    #[error("backend returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("failed to decode response: {message}")]
    Decode { message: String },
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Network,
    HttpStatus,
    Decode,
    Url,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network { .. } => ApiErrorKind::Network,
            ApiError::HttpStatus { .. } => ApiErrorKind::HttpStatus,
            ApiError::Decode { .. } => ApiErrorKind::Decode,
            ApiError::Url(_) => ApiErrorKind::Url,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for a notification toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network { .. } => {
                "Could not reach the backend. Check that the API is running.".to_string()
            }
            ApiError::HttpStatus { status, .. } => format!("The backend responded with {status}."),
            ApiError::Decode { .. } => {
                "The backend sent a response that could not be read.".to_string()
            }
            ApiError::Url(_) => "The request URL is invalid.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        let err = ApiError::HttpStatus {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.kind(), ApiErrorKind::HttpStatus);
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.user_message(), "The backend responded with 502.");

        let err = ApiError::Network {
            message: "connection refused".into(),
        };
        assert_eq!(err.kind(), ApiErrorKind::Network);
        assert_eq!(err.status(), None);
    }
}
