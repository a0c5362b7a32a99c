//! Portal login
//!
//! Performs the CSRF-protected form login and hands back an
//! authenticated [`PortalSession`].

use tracing::{info, warn};

use crate::client::{ClientConfig, PortalClient};
use crate::error::{Result, TrackingError};
use crate::parser::extract_csrf_token;
use crate::session::PortalSession;
use crate::types::Credentials;
use crate::url::{build_login_page_url, build_login_url, is_home_url};

/// Text only present on pages rendered for a logged-in user
const LOGGED_IN_MARKER: &str = "Sim";

/// Entry point for talking to the portal
///
/// Holds client configuration only. Each [`TrackingScraper::login`] call
/// creates an independent session with its own cookie jar.
#[derive(Debug, Clone, Default)]
pub struct TrackingScraper {
    config: ClientConfig,
}

impl TrackingScraper {
    /// Create a new scraper with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new scraper with custom client configuration
    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Log in to the portal
    ///
    /// Fetches the login page for a CSRF token, posts the credential form
    /// and checks that the portal accepted it.
    ///
    /// # Arguments
    /// * `credentials` - Portal base URL, username, password and location
    ///
    /// # Returns
    /// An authenticated session for use within the current request
    ///
    /// # Errors
    /// - `CsrfTokenMissing` if the login page has no token
    /// - `AuthenticationFailed` if the portal rejected the login
    /// - `LoginRequest` on network failure
    /// - `Request` if the HTTP client cannot be built
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> mpp_tracking_core::Result<()> {
    /// use mpp_tracking_core::{Credentials, SearchQuery, TrackingScraper};
    /// let scraper = TrackingScraper::new();
    /// let credentials = Credentials::new("https://portal.example", "user", "secret", "1")?;
    /// let session = scraper.login(&credentials).await?;
    /// let records = session.search(&SearchQuery::new("Budi")).await?;
    /// println!("{} applications", records.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, credentials: &Credentials) -> Result<PortalSession> {
        let base_url = credentials.base_url();
        info!(
            base_url,
            username = credentials.username(),
            location = credentials.location_id(),
            "logging in to portal"
        );

        let client = PortalClient::with_config(&self.config)?;

        let login_page = client
            .get(&build_login_page_url(base_url))
            .await
            .map_err(|e| TrackingError::LoginRequest(e.to_string()))?;

        let token = extract_csrf_token(&login_page.body).ok_or_else(|| {
            warn!(base_url, "login page carries no CSRF token");
            TrackingError::CsrfTokenMissing
        })?;

        let form = [
            ("_token", token.as_str()),
            ("db_name", credentials.location_id()),
            ("username", credentials.username()),
            ("password", credentials.password()),
        ];

        let response = client
            .post_form(&build_login_url(base_url), &form)
            .await
            .map_err(|e| TrackingError::LoginRequest(e.to_string()))?;

        if !response.body.contains(LOGGED_IN_MARKER) && !is_home_url(&response.url) {
            warn!(
                base_url,
                username = credentials.username(),
                final_url = %response.url,
                "portal rejected login"
            );
            return Err(TrackingError::AuthenticationFailed);
        }

        info!(base_url, username = credentials.username(), "portal login succeeded");
        Ok(PortalSession::new(client, base_url.to_string()))
    }
}
