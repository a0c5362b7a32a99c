//! Permit PDF extraction from application detail pages

use regex::Regex;
use scraper::{Html, Selector};

/// Extracts the embedded PDF viewer source from a detail page
///
/// Tries `<embed type="application/pdf">` first, then falls back to any
/// `<embed>` whose `src` ends in `.pdf` (query string allowed).
///
/// # Arguments
/// * `html` - Raw HTML string of the detail page
///
/// # Returns
/// The `src` value as written in the page (may be relative)
pub fn extract_pdf_link(html: &str) -> Option<String> {
    extract_from_embed(html).or_else(|| extract_from_markup(html))
}

fn extract_from_embed(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"embed[type="application/pdf"]"#).ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string)
}

fn extract_from_markup(html: &str) -> Option<String> {
    let re = Regex::new(r#"(?i)<embed[^>]+src=["']([^"']+\.pdf[^"']*)["']"#).ok()?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
