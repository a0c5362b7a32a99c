//! Error types for the MPP Digital tracking scraper
//!
//! Provides a single error enum with human-readable messages
//! and a string serialization suitable for JSON envelopes.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all portal scraping operations
///
/// Row-level and enrichment failures never reach this type; they are
/// absorbed where they happen. Only failures that stop a login or the
/// primary search are surfaced.
#[derive(Error, Debug)]
pub enum TrackingError {
    /// HTTP client could not be built or a request could not be sent
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Base URL or detail URL is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Login page did not carry an anti-forgery token
    #[error("CSRF token not found on login page")]
    CsrfTokenMissing,

    /// Login form was submitted but the portal did not accept it
    #[error("Login failed: invalid username or password")]
    AuthenticationFailed,

    /// Network failure while talking to the login endpoints
    #[error("Login request failed: {0}")]
    LoginRequest(String),

    /// Portal answered with a non-success HTTP status
    #[error("Portal returned HTTP {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Network or HTTP failure on the primary search request
    #[error("Search request failed: {0}")]
    SearchFailed(String),
}

impl TrackingError {
    /// Whether the error belongs to the login phase of a request
    pub fn is_login_failure(&self) -> bool {
        matches!(
            self,
            TrackingError::CsrfTokenMissing
                | TrackingError::AuthenticationFailed
                | TrackingError::LoginRequest(_)
        )
    }
}

impl Serialize for TrackingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;
