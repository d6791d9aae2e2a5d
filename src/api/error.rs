//! Error types for the gateway client.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while talking to the gateway.
///
/// Transport failures and non-2xx answers are both plain failures to the
/// storefront; the split exists so logs and the load generator can tell them
/// apart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused, reset, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("Request failed with status code {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    /// The gateway answered 2xx but the body was not what was expected.
    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

impl ApiError {
    /// HTTP status carried by the error, if the gateway answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
