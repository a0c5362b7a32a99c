//! Error types for the tracking API
//!
//! [`ApiError`] covers request handling and renders the JSON failure
//! envelope. [`AppError`] covers startup.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mpp_tracking_core::TrackingError;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::ConfigError;
use crate::routes::Envelope;
use crate::telemetry::TelemetryError;

/// Failure of a single API request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authorization header absent or not equal to the configured token
    #[error("Unauthorized: Invalid or missing authorization token")]
    Unauthorized,

    /// Required body fields absent, in declaration order
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Body is not a JSON object or a field has the wrong type
    #[error("{0}")]
    InvalidBody(String),

    #[error(transparent)]
    Tracking(#[from] TrackingError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingFields(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Tracking(TrackingError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            ApiError::Tracking(err) if err.is_login_failure() => StatusCode::UNAUTHORIZED,
            ApiError::Tracking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response envelope
    pub fn message(&self) -> String {
        if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            format!("Error: {}", self)
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(%status, %message, "tracking request failed");
        } else {
            warn!(%status, %message, "tracking request rejected");
        }

        (status, Json(Envelope::<()>::failure(message))).into_response()
    }
}

/// Failure while starting or running the server
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
