//! VAST Error Types
//!
//! Failures while obtaining the inventory document. None of these reach the
//! player: the serve use case logs them and answers with an empty VAST.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::fetch::FetchError;
use thiserror::Error;

/// VAST-specific result type alias
pub type VastResult<T> = Result<T, VastError>;

#[derive(Debug, Error)]
pub enum VastError {
    /// Local document missing or unreadable
    #[error("Ad config unavailable at {path}: {source}")]
    ConfigUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote document could not be fetched
    #[error("Ad config fetch failed: {0}")]
    ConfigFetch(#[from] FetchError),

    /// Document is not a JSON object
    #[error("Ad config malformed: {0}")]
    ConfigMalformed(#[from] serde_json::Error),

    /// The configured source location cannot be used
    #[error("Invalid ad config location: {0}")]
    InvalidLocation(String),
}

impl VastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VastError::ConfigUnavailable { .. } => ErrorKind::ServiceUnavailable,
            VastError::ConfigFetch(e) if e.is_timeout() => ErrorKind::GatewayTimeout,
            VastError::ConfigFetch(_) => ErrorKind::BadGateway,
            VastError::ConfigMalformed(_) => ErrorKind::UnprocessableEntity,
            VastError::InvalidLocation(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            VastError::InvalidLocation(location) => {
                tracing::error!(location = %location, "Ad config location is invalid");
            }
            _ => {
                tracing::warn!(
                    kind = %self.kind(),
                    error = %self,
                    "Ad config unavailable, serving empty VAST"
                );
            }
        }
    }
}

impl From<VastError> for AppError {
    fn from(err: VastError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message).with_source(err)
    }
}
