//! MPP Digital Tracking API
//!
//! Small axum service relaying tracking queries to the MPP Digital portal.
//!
//! | Method | Path                    | Auth  |
//! |--------|-------------------------|-------|
//! | POST   | `/api/tracking/search`  | token |
//! | POST   | `/api/tracking/detail`  | token |
//! | GET    | `/api/tracking/health`  | none  |
//!
//! Protected endpoints require the `Authorization` header to equal
//! `TRACKING_API_TOKEN` exactly. Every response is a JSON object with
//! `success` and `message`.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod request;
pub mod routes;
mod server;
pub mod telemetry;

pub use cli::run;
pub use routes::{router, AppState};
