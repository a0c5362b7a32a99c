//! Authenticated portal session
//!
//! Searches the application list and follows up on rows whose stage
//! needs a second page. Only the primary search can fail the call.

use tracing::{debug, info, warn};

use crate::client::PortalClient;
use crate::error::{Result, TrackingError};
use crate::parser::{extract_pdf_link, parse_application_rows, parse_rejection_reason, StageAction};
use crate::types::{ApplicationRecord, DetailInfo, SearchQuery};
use crate::url::{build_search_url, resolve_page_link, StatusFilter};

/// A logged-in portal session
///
/// Wraps the cookie jar established by [`crate::TrackingScraper::login`].
/// It is owned by the request that created it and dropped with it; there
/// is no logout.
pub struct PortalSession {
    client: PortalClient,
    base_url: String,
}

impl PortalSession {
    pub(crate) fn new(client: PortalClient, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search applications by applicant name
    ///
    /// Rows with stage "SK DITERBITKAN" get their permit PDF link from the
    /// detail page; rows with stage "DITOLAK" get their rejection reason
    /// from a rejected-only search. Follow-up failures leave the field empty.
    ///
    /// # Errors
    /// `SearchFailed` if the search page cannot be fetched
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ApplicationRecord>> {
        let url = build_search_url(&self.base_url, &query.applicant_name, StatusFilter::All);

        let page = self
            .client
            .get(&url)
            .await
            .map_err(TrackingError::from)
            .and_then(|page| page.ensure_success())
            .map_err(|e| TrackingError::SearchFailed(e.to_string()))?;

        let mut records = parse_application_rows(&page.body, &self.base_url);
        debug!(
            applicant = %query.applicant_name,
            rows = records.len(),
            "parsed search results"
        );

        for record in &mut records {
            self.enrich(record).await;
        }

        Ok(records)
    }

    /// Fetch a detail page and look for the permit PDF
    ///
    /// Never fails: fetch errors are reported in [`DetailInfo::error`].
    pub async fn get_detail(&self, detail_url: &str) -> DetailInfo {
        match self.try_fetch_permit_document(detail_url).await {
            Ok(permit_document_link) => DetailInfo {
                permit_document_link,
                error: None,
            },
            Err(e) => {
                warn!(detail_url, error = %e, "detail page fetch failed");
                DetailInfo::failed(format!("Failed to fetch detail page: {}", e))
            }
        }
    }

    async fn enrich(&self, record: &mut ApplicationRecord) {
        match StageAction::from_stage(&record.stage) {
            StageAction::Issued => {
                let Some(detail_link) = record.detail_link.as_deref() else {
                    return;
                };
                info!(applicant = %record.applicant_name, "permit issued, fetching PDF link");
                record.permit_document_link = self.fetch_permit_document(detail_link).await;
            }
            StageAction::Rejected => {
                info!(applicant = %record.applicant_name, "application rejected, fetching reason");
                record.rejection_reason = self.fetch_rejection_reason(&record.applicant_name).await;
            }
            StageAction::Plain => {}
        }
    }

    async fn fetch_permit_document(&self, detail_url: &str) -> Option<String> {
        match self.try_fetch_permit_document(detail_url).await {
            Ok(Some(link)) => {
                debug!(%link, "permit PDF found");
                Some(link)
            }
            Ok(None) => {
                warn!(detail_url, "no permit PDF on detail page");
                None
            }
            Err(e) => {
                warn!(detail_url, error = %e, "permit PDF lookup failed");
                None
            }
        }
    }

    async fn try_fetch_permit_document(&self, detail_url: &str) -> Result<Option<String>> {
        let page = self.client.get(detail_url).await?.ensure_success()?;

        Ok(extract_pdf_link(&page.body).map(|src| resolve_page_link(&page.url, &src)))
    }

    async fn fetch_rejection_reason(&self, applicant_name: &str) -> Option<String> {
        match self.try_fetch_rejection_reason(applicant_name).await {
            Ok(Some(reason)) => {
                debug!(applicant_name, %reason, "rejection reason found");
                Some(reason)
            }
            Ok(None) => {
                warn!(applicant_name, "no rejection reason in rejected list");
                None
            }
            Err(e) => {
                warn!(applicant_name, error = %e, "rejection reason lookup failed");
                None
            }
        }
    }

    async fn try_fetch_rejection_reason(&self, applicant_name: &str) -> Result<Option<String>> {
        let url = build_search_url(&self.base_url, applicant_name, StatusFilter::Rejected);
        let page = self.client.get(&url).await?.ensure_success()?;

        Ok(parse_rejection_reason(&page.body))
    }
}
