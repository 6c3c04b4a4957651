use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call against the parking API.
///
/// Only `Application` carries text meant for the user; every other variant is
/// reported as a generic network problem.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Application {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Raw server text for a non-success response.
    pub fn server_text(&self) -> Option<&str> {
        match self {
            ApiError::Application { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_application(&self) -> bool {
        matches!(self, ApiError::Application { .. })
    }
}
