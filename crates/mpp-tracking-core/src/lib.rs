//! MPP Digital Tracking Core Library
//!
//! Logs in to the MPP Digital licensing portal, searches its application
//! list and reshapes the returned HTML into typed records.
//!
//! # Overview
//!
//! - HTML extractors for the CSRF token, permit PDF and result table
//! - [`TrackingScraper`] performing the CSRF-protected form login
//! - [`PortalSession`] searching applications and fetching detail pages,
//!   following up on issued and rejected applications
//!
//! # Example
//!
//! ```no_run
//! use mpp_tracking_core::{Credentials, Result, SearchQuery, TrackingScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = TrackingScraper::new();
//!     let credentials = Credentials::new("https://portal.example", "operator", "secret", "1")?;
//!
//!     let session = scraper.login(&credentials).await?;
//!     for record in session.search(&SearchQuery::new("Budi Santoso")).await? {
//!         println!("{} {}: {}", record.application_number, record.applicant_name, record.stage);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Sessions
//!
//! Every login creates a fresh cookie jar. A [`PortalSession`] is meant to
//! live for a single incoming request and is simply dropped afterwards.

mod client;
mod error;
pub mod parser;
mod scraper;
mod session;
mod types;
pub mod url;

// Re-export client types
pub use client::ClientConfig;

// Re-export error types
pub use error::{Result, TrackingError};

// Re-export parser functions
pub use parser::{extract_csrf_token, extract_pdf_link, extract_table_rows};

// Re-export main scraper API
pub use scraper::TrackingScraper;
pub use session::PortalSession;

// Re-export data types
pub use types::{ApplicationRecord, Credentials, DetailInfo, SearchQuery, DEFAULT_LOCATION_ID};
