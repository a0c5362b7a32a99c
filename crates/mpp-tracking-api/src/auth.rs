//! Shared-secret check for the protected endpoints

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use constant_time_eq::constant_time_eq;
use tracing::warn;

use crate::error::ApiError;
use crate::routes::AppState;

/// The shared secret callers must send verbatim in `Authorization`
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(Arc<str>);

impl ApiToken {
    /// Returns `None` for an empty or whitespace-only secret
    pub fn new(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self(Arc::from(value)))
    }

    /// Constant-time comparison with a supplied header value
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();

        if expected.len() != candidate.len() {
            return false;
        }

        constant_time_eq(expected, candidate)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken([REDACTED])")
    }
}

/// Rejects the request with 401 unless `Authorization` equals the token
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| state.token.matches(value));

    if !authorized {
        warn!(path = %request.uri().path(), "rejected request with bad authorization header");
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
