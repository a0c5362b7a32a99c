//! HTML parsers for the MPP Digital portal
//!
//! Every extractor tries a structural lookup first and falls back to a
//! pattern match on the raw markup. Missing elements yield `None` or an
//! empty list, never an error.

pub mod applications;
pub mod pdf;
pub mod table;
pub mod token;

pub use applications::{
    normalize_phone, parse_application_rows, parse_rejection_reason, StageAction,
    RESULTS_TABLE_ID,
};
pub use pdf::extract_pdf_link;
pub use table::{extract_table_rows, TableCell};
pub use token::extract_csrf_token;
