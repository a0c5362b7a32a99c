//! CSRF token extraction from the portal login page

use regex::Regex;
use scraper::{Html, Selector};

/// Extracts the anti-forgery token from a login page
///
/// Looks for the hidden `_token` form field first, then the
/// `csrf-token` meta tag. Empty values are ignored.
///
/// # Arguments
/// * `html` - Raw HTML string of the login page
///
/// # Returns
/// The token value, or `None` if neither form is present
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    select_attr(&document, r#"input[name="_token"]"#, "value")
        .or_else(|| match_token(html, r#"name="_token"\s+value="([^"]+)""#))
        .or_else(|| select_attr(&document, r#"meta[name="csrf-token"]"#, "content"))
        .or_else(|| match_token(html, r#"<meta\s+name="csrf-token"\s+content="([^"]+)""#))
}

/// Reads a non-empty attribute from the first element matching `selector`
fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Regex fallback over the raw markup
fn match_token(html: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
