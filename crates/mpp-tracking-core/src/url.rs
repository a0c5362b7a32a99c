//! URL helper functions for the MPP Digital portal
//!
//! Provides functions for building login, search and detail URLs.

use reqwest::Url;

/// Portal home path; a successful login lands here
pub const HOME_PATH: &str = "/sim";

const LOGIN_PATH: &str = "/sim/login";
const SEARCH_PATH: &str = "/sim/permohonan";

/// Status filter values understood by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Rejected,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Rejected => "tolak",
        }
    }
}

/// Validates a base URL and strips trailing slashes
///
/// # Returns
/// `Some(base)` for absolute http(s) URLs, `None` otherwise
///
/// # Example
/// ```
/// use mpp_tracking_core::url::normalize_base_url;
/// assert_eq!(normalize_base_url("https://host/"), Some("https://host".to_string()));
/// assert_eq!(normalize_base_url("host"), None);
/// ```
pub fn normalize_base_url(base_url: &str) -> Option<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).ok()?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }

    Some(trimmed.to_string())
}

/// Login page carrying the CSRF token
pub fn build_login_page_url(base_url: &str) -> String {
    format!("{}{}", base_url, HOME_PATH)
}

/// Endpoint receiving the login form
pub fn build_login_url(base_url: &str) -> String {
    format!("{}{}", base_url, LOGIN_PATH)
}

/// Builds the application search URL for an applicant name and status filter
///
/// # Example
/// ```
/// use mpp_tracking_core::url::{build_search_url, StatusFilter};
/// let url = build_search_url("https://host", "budi santoso", StatusFilter::All);
/// assert_eq!(url, "https://host/sim/permohonan?cari=budi%20santoso&status=all");
/// ```
pub fn build_search_url(base_url: &str, applicant_name: &str, status: StatusFilter) -> String {
    format!(
        "{}{}?cari={}&status={}",
        base_url,
        SEARCH_PATH,
        urlencoding::encode(applicant_name),
        status.as_str()
    )
}

/// Turns a detail anchor `href` into an absolute URL
///
/// Hrefs starting with `http` are returned unchanged; anything else is
/// appended to `base_url` with exactly one `/` between them.
///
/// # Example
/// ```
/// use mpp_tracking_core::url::resolve_detail_link;
/// assert_eq!(
///     resolve_detail_link("https://host", "sim/x"),
///     Some("https://host/sim/x".to_string())
/// );
/// ```
pub fn resolve_detail_link(base_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("http") {
        return Some(href.to_string());
    }

    if href.starts_with('/') {
        Some(format!("{}{}", base_url, href))
    } else {
        Some(format!("{}/{}", base_url, href))
    }
}

/// Resolves a possibly relative link against the page it was found on
pub fn resolve_page_link(page_url: &str, link: &str) -> String {
    if Url::parse(link).is_ok() {
        return link.to_string();
    }

    Url::parse(page_url)
        .and_then(|page| page.join(link))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| link.to_string())
}

/// Whether a final response URL is the portal home page
pub fn is_home_url(url: &str) -> bool {
    url.ends_with(HOME_PATH)
}
