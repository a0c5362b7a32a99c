//! Cookie-keeping HTTP client for the MPP Digital portal
//!
//! Every login builds its own client so cookies never leak between
//! requests. All calls use a bounded connect timeout and read timeout;
//! nothing is retried.

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::{Result, TrackingError};

/// Configuration for the portal HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// TCP connect timeout in seconds (default: 10)
    pub connect_timeout_secs: u64,
    /// Per-read timeout in seconds (default: 60)
    pub read_timeout_secs: u64,
    /// Skip TLS certificate verification (default: true)
    ///
    /// The production portal serves a certificate that does not verify.
    /// Turning this on removes transport trust toward the portal; only
    /// keep it for endpoints the operator has signed off on.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            read_timeout_secs: 60,
            accept_invalid_certs: true,
        }
    }
}

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const MAX_REDIRECTS: usize = 10;

/// A fetched page after redirects
#[derive(Debug, Clone)]
pub(crate) struct Page {
    /// Final URL after following redirects
    pub(crate) url: String,
    pub(crate) status: StatusCode,
    pub(crate) body: String,
}

impl Page {
    /// Turns a non-success status into `UnexpectedStatus`
    pub(crate) fn ensure_success(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(TrackingError::UnexpectedStatus {
                url: self.url,
                status: self.status.as_u16(),
            })
        }
    }
}

/// HTTP client wrapper holding one cookie jar
pub(crate) struct PortalClient {
    client: reqwest::Client,
}

impl PortalClient {
    /// Create a new client with a fresh, empty cookie jar
    pub(crate) fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(TrackingError::Request)?;

        Ok(Self { client })
    }

    /// GET a page, following redirects
    ///
    /// Non-success statuses are returned in [`Page::status`], not as errors.
    pub(crate) async fn get(&self, url: &str) -> reqwest::Result<Page> {
        let response = self.client.get(url).send().await?;
        Self::read_page(response).await
    }

    /// POST an urlencoded form, following redirects
    pub(crate) async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> reqwest::Result<Page> {
        let response = self.client.post(url).form(form).send().await?;
        Self::read_page(response).await
    }

    async fn read_page(response: reqwest::Response) -> reqwest::Result<Page> {
        let url = response.url().to_string();
        let status = response.status();
        let body = response.text().await?;

        Ok(Page { url, status, body })
    }
}
