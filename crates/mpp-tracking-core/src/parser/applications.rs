//! Application list parser for the portal's search page
//!
//! Turns rows of the `tabel1` results table into [`ApplicationRecord`]s.
//! Enrichment (PDF link, rejection reason) is left to the session.

use regex::Regex;

use crate::parser::table::{extract_table_rows, TableCell};
use crate::types::ApplicationRecord;
use crate::url::resolve_detail_link;

/// `id` of the results table on the search page
pub const RESULTS_TABLE_ID: &str = "tabel1";

/// Stage label of an application whose permit has been issued
pub const STAGE_ISSUED: &str = "SK DITERBITKAN";

/// Stage label of a rejected application
pub const STAGE_REJECTED: &str = "DITOLAK";

/// Rows shorter than this are not application rows
const MIN_COLUMNS: usize = 9;

const COL_DETAIL: usize = 0;
const COL_NUMBER: usize = 1;
const COL_PERMIT: usize = 2;
const COL_NAME: usize = 4;
const COL_PHONE: usize = 6;
const COL_DATE: usize = 7;
const COL_STAGE: usize = 8;
const COL_REASON: usize = 9;

/// Follow-up fetch required by a row's stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    /// Permit issued, the detail page embeds the permit PDF
    Issued,
    /// Rejected, the reason lives on the rejected-only search
    Rejected,
    /// Nothing to fetch
    Plain,
}

impl StageAction {
    /// Classifies a stage label, ignoring case and surrounding whitespace
    pub fn from_stage(stage: &str) -> Self {
        let stage = stage.trim().to_uppercase();
        if stage == STAGE_ISSUED {
            StageAction::Issued
        } else if stage == STAGE_REJECTED {
            StageAction::Rejected
        } else {
            StageAction::Plain
        }
    }
}

/// Parses the search results page into unenriched records
///
/// # Arguments
/// * `html` - Raw HTML string of the search page
/// * `base_url` - Portal base URL used to absolutize detail links
///
/// # Returns
/// One record per well-formed row; short rows are skipped
pub fn parse_application_rows(html: &str, base_url: &str) -> Vec<ApplicationRecord> {
    extract_table_rows(html, RESULTS_TABLE_ID)
        .iter()
        .filter_map(|cells| parse_application_row(cells, base_url))
        .collect()
}

fn parse_application_row(cells: &[TableCell], base_url: &str) -> Option<ApplicationRecord> {
    if cells.len() < MIN_COLUMNS {
        return None;
    }

    let detail_link = cells
        .get(COL_DETAIL)?
        .link
        .as_deref()
        .and_then(|href| resolve_detail_link(base_url, href));

    Some(ApplicationRecord {
        application_number: cells.get(COL_NUMBER)?.text.clone(),
        permit_name: cells.get(COL_PERMIT)?.text.clone(),
        applicant_name: cells.get(COL_NAME)?.text.clone(),
        phone_number: normalize_phone(&cells.get(COL_PHONE)?.text),
        submission_date: cells.get(COL_DATE)?.text.clone(),
        stage: cells.get(COL_STAGE)?.text.clone(),
        detail_link,
        permit_document_link: None,
        rejection_reason: None,
    })
}

/// Normalizes a phone cell to digits only
///
/// Looks for a run of at least five digits (optionally led by `+`, with
/// spaces, hyphens, dots or parentheses in between) and strips everything
/// but the digits. Text without such a run is returned trimmed.
///
/// # Example
/// ```
/// use mpp_tracking_core::parser::normalize_phone;
/// assert_eq!(normalize_phone("+62 812-3456-7890"), "6281234567890");
/// assert_eq!(normalize_phone("  n/a "), "n/a");
/// ```
pub fn normalize_phone(text: &str) -> String {
    let trimmed = text.trim();

    let Ok(re) = Regex::new(r"\+?\d[\d\s\-().]{4,}") else {
        return trimmed.to_string();
    };

    match re.find(trimmed) {
        Some(m) => m.as_str().chars().filter(char::is_ascii_digit).collect(),
        None => trimmed.to_string(),
    }
}

/// Reads the rejection reason from the first row of a rejected-only search
///
/// Uses column 9 when present. On a nine-column row column 8 is used,
/// unless it only repeats the "DITOLAK" stage label.
pub fn parse_rejection_reason(html: &str) -> Option<String> {
    let rows = extract_table_rows(html, RESULTS_TABLE_ID);
    let first = rows.first()?;

    let reason = if first.len() > COL_REASON {
        first[COL_REASON].text.as_str()
    } else if first.len() > COL_STAGE {
        let text = first[COL_STAGE].text.as_str();
        if text.to_uppercase() == STAGE_REJECTED {
            return None;
        }
        text
    } else {
        return None;
    };

    if reason.is_empty() {
        None
    } else {
        Some(reason.to_string())
    }
}
