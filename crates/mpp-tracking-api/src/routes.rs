//! HTTP routes of the tracking relay
//!
//! Each protected call logs in to the portal, does its work with the
//! resulting session and drops it before responding.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use mpp_tracking_core::{ApplicationRecord, DetailInfo, SearchQuery, TrackingScraper};
use serde::Serialize;
use tracing::info;

use crate::auth::{require_token, ApiToken};
use crate::error::ApiError;
use crate::request::{TrackingRequest, DETAIL_FIELDS, SEARCH_FIELDS};

const SEARCH_PATH: &str = "/api/tracking/search";
const DETAIL_PATH: &str = "/api/tracking/detail";
const HEALTH_PATH: &str = "/api/tracking/health";

/// Shared, read-only server state
#[derive(Debug, Clone)]
pub struct AppState {
    pub token: ApiToken,
    pub scraper: TrackingScraper,
}

impl AppState {
    pub fn new(token: ApiToken, scraper: TrackingScraper) -> Self {
        Self { token, scraper }
    }
}

/// JSON envelope shared by every response
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            total: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            total: None,
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub version: String,
}

/// Builds the router; POST paths also answer with a trailing slash
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(SEARCH_PATH, post(search_handler))
        .route(&format!("{}/", SEARCH_PATH), post(search_handler))
        .route(DETAIL_PATH, post(detail_handler))
        .route(&format!("{}/", DETAIL_PATH), post(detail_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .merge(protected)
        .with_state(state)
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "MPP Digital Tracking API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Envelope<Vec<ApplicationRecord>>>, ApiError> {
    let request = TrackingRequest::parse(&body, &SEARCH_FIELDS)?;
    let credentials = request.credentials()?;
    let query = SearchQuery::new(request.text("nama_pemohon")?);

    let session = state.scraper.login(&credentials).await?;
    let records = session.search(&query).await?;

    let total = records.len();
    info!(
        base_url = credentials.base_url(),
        applicant = %query.applicant_name,
        total,
        "search completed"
    );

    let message = format!("Found {} results for \"{}\"", total, query.applicant_name);
    Ok(Json(Envelope::success(message, records).with_total(total)))
}

pub async fn detail_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Envelope<DetailInfo>>, ApiError> {
    let request = TrackingRequest::parse(&body, &DETAIL_FIELDS)?;
    let credentials = request.credentials()?;
    let detail_link = request.text("detail_link")?;

    let session = state.scraper.login(&credentials).await?;
    let detail = session.get_detail(detail_link).await;

    info!(
        detail_link,
        found = detail.permit_document_link.is_some(),
        "detail fetched"
    );

    Ok(Json(Envelope::success("Applicant detail retrieved", detail)))
}
