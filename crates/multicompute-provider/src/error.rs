//! Error types for data providers.

use thiserror::Error;

/// Convert any `Display` error into a `ProviderError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| $crate::error::ProviderError::$variant(e.to_string())
    };
}

pub(crate) use map_err;

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors a data source reports to its caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The referenced channel does not exist (mock source).
    #[error("channel {0} not found")]
    NotFound(String),

    /// The backend answered outside 200–299.
    #[error("HTTP error! status: {status}")]
    RequestFailed { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Encode(String),

    #[error("deserialization error: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// HTTP status carried by a failed remote request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// The target record is absent, however the backend reported it.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProviderError::NotFound(_) | ProviderError::RequestFailed { status: 404 }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_for_request_failures() {
        assert_eq!(ProviderError::RequestFailed { status: 503 }.status(), Some(503));
        assert_eq!(ProviderError::NotFound("x".into()).status(), None);
    }

    #[test]
    fn not_found_covers_both_sources() {
        assert!(ProviderError::NotFound("x".into()).is_not_found());
        assert!(ProviderError::RequestFailed { status: 404 }.is_not_found());
        assert!(!ProviderError::RequestFailed { status: 500 }.is_not_found());
        assert!(!ProviderError::Transport("reset".into()).is_not_found());
    }

    #[test]
    fn messages() {
        assert_eq!(
            ProviderError::NotFound("amd-lts".into()).to_string(),
            "channel amd-lts not found"
        );
        assert_eq!(
            ProviderError::RequestFailed { status: 404 }.to_string(),
            "HTTP error! status: 404"
        );
    }
}
