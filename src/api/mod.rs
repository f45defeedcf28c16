//! HTTP client for the retailer backend and the payload types it speaks.

pub mod client;
pub mod models;

pub use client::ApiClient;

use std::error::Error as StdError;
use std::fmt;

/// Shown when the backend cannot be reached at all.
pub const NO_INTERNET_CONNECTION: &str = "No internet connection";

/// Fallback for status codes without a canonical reason phrase.
pub const INVALID_SERVER_REQUEST: &str = "Invalid server request";

/// Failure of one API call. Carries exactly what the user sees: network
/// errors surface their message, non-success responses surface the
/// status reason. Never retried automatically.
#[derive(Debug)]
pub enum ApiError {
    /// Could not establish a connection to the backend.
    NoConnection,
    /// Transport or decode failure after a connection was made.
    Request(reqwest::Error),
    /// The backend answered with a non-success status.
    Status(reqwest::StatusCode),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NoConnection => write!(f, "{NO_INTERNET_CONNECTION}"),
            ApiError::Request(source) => write!(f, "{source}"),
            ApiError::Status(status) => {
                write!(f, "{}", status.canonical_reason().unwrap_or(INVALID_SERVER_REQUEST))
            }
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Request(source) => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ApiError::NoConnection
        } else {
            ApiError::Request(err)
        }
    }
}
