use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Field-level detail attached to a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDetail {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} ({status})")]
    Api {
        status: StatusCode,
        message: String,
        errors: Vec<FieldDetail>,
    },

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Another request is already in progress")]
    Busy,

    #[error("Auth cache I/O failed: {0}")]
    Cache(#[from] std::io::Error),

    #[error("Auth cache is malformed: {0}")]
    CacheFormat(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server rejected the token, so the stored session is stale.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}
