//! Core data types for the MPP Digital tracking scraper
//!
//! Field names on the wire follow the portal's own vocabulary so existing
//! consumers of the tracking API keep working.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackingError};
use crate::url::normalize_base_url;

/// Default portal location (`db_name` form field) when none is supplied
pub const DEFAULT_LOCATION_ID: &str = "1";

/// Portal login credentials, supplied per request
///
/// The `Debug` impl redacts the password so credentials can be traced safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    base_url: String,
    username: String,
    password: String,
    location_id: String,
}

impl Credentials {
    /// Build credentials, stripping trailing slashes from `base_url`
    ///
    /// # Errors
    /// Returns `InvalidUrl` if `base_url` is not an absolute http(s) URL
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
        location_id: impl Into<String>,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url)
            .ok_or_else(|| TrackingError::InvalidUrl(base_url.to_string()))?;

        Ok(Self {
            base_url,
            username: username.into(),
            password: password.into(),
            location_id: location_id.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("location_id", &self.location_id)
            .finish()
    }
}

/// Search filter for the application list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub applicant_name: String,
}

impl SearchQuery {
    pub fn new(applicant_name: impl Into<String>) -> Self {
        Self {
            applicant_name: applicant_name.into(),
        }
    }
}

/// One row of the portal's application table
///
/// At most one of `permit_document_link` and `rejection_reason` is set,
/// depending on `stage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Application number (e.g., "PRM-2025-00123")
    #[serde(rename = "no_permohonan")]
    pub application_number: String,

    /// Name of the requested permit
    #[serde(rename = "nama_izin")]
    pub permit_name: String,

    #[serde(rename = "nama")]
    pub applicant_name: String,

    /// Digits only when a phone-like run was found, raw text otherwise
    #[serde(rename = "nomor_hp")]
    pub phone_number: String,

    /// Submission date as rendered by the portal
    #[serde(rename = "tgl_pengajuan")]
    pub submission_date: String,

    /// Status label (e.g., "SK DITERBITKAN", "DITOLAK")
    #[serde(rename = "tahapan")]
    pub stage: String,

    /// Absolute URL of the application detail page
    pub detail_link: Option<String>,

    /// Issued permit PDF, only for "SK DITERBITKAN"
    #[serde(rename = "link_izin")]
    pub permit_document_link: Option<String>,

    /// Rejection reason, only for "DITOLAK"
    #[serde(rename = "alasan_tolak")]
    pub rejection_reason: Option<String>,
}

/// Result of fetching a single detail page
///
/// Failures are reported in `error` instead of being raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailInfo {
    #[serde(rename = "pdf_link", default, skip_serializing_if = "Option::is_none")]
    pub permit_document_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetailInfo {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            permit_document_link: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ApplicationRecord {
        ApplicationRecord {
            application_number: "PRM-001".to_string(),
            permit_name: "Izin Usaha".to_string(),
            applicant_name: "Budi Santoso".to_string(),
            phone_number: "6281234567890".to_string(),
            submission_date: "10-11-2025".to_string(),
            stage: "DITOLAK".to_string(),
            detail_link: Some("https://host/sim/permohonan/detail/5".to_string()),
            permit_document_link: None,
            rejection_reason: Some("Berkas tidak lengkap".to_string()),
        }
    }

    #[test]
    fn test_record_uses_portal_field_names() {
        let json = serde_json::to_value(record()).expect("Serialization should succeed");

        assert_eq!(json["no_permohonan"], "PRM-001");
        assert_eq!(json["nama"], "Budi Santoso");
        assert_eq!(json["nomor_hp"], "6281234567890");
        assert_eq!(json["tahapan"], "DITOLAK");
        assert_eq!(json["alasan_tolak"], "Berkas tidak lengkap");
        assert!(json["link_izin"].is_null());
    }

    #[test]
    fn test_detail_info_omits_absent_fields() {
        let json = serde_json::to_string(&DetailInfo::default()).expect("Serialization should succeed");
        assert_eq!(json, "{}");

        let failed = serde_json::to_string(&DetailInfo::failed("boom")).expect("Serialization should succeed");
        assert_eq!(failed, r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_credentials_trim_base_url() {
        let credentials = Credentials::new("https://host/", "user", "secret", "1").unwrap();
        assert_eq!(credentials.base_url(), "https://host");
        assert_eq!(credentials.location_id(), "1");
    }

    #[test]
    fn test_credentials_reject_relative_base_url() {
        let result = Credentials::new("host/sim", "user", "secret", "1");
        assert!(matches!(result, Err(TrackingError::InvalidUrl(_))));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("https://host", "user", "hunter2", "1").unwrap();
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
