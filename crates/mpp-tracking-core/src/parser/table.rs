//! Generic table body extraction

use scraper::{ElementRef, Html, Selector};

/// A single `<td>` cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    /// Concatenated text content, trimmed
    pub text: String,
    /// `href` of the first anchor inside the cell, if any
    pub link: Option<String>,
}

/// Extracts the body rows of the table with the given `id`
///
/// # Arguments
/// * `html` - Raw HTML string
/// * `table_id` - Value of the table's `id` attribute
///
/// # Returns
/// One entry per `<tr>` in the table body, each holding its cells in order.
/// Empty if the table or its body is missing.
pub fn extract_table_rows(html: &str, table_id: &str) -> Vec<Vec<TableCell>> {
    let document = Html::parse_document(html);

    let Some(body) = find_table_body(&document, table_id) else {
        return Vec::new();
    };

    let (Ok(row_selector), Ok(cell_selector)) = (Selector::parse("tr"), Selector::parse("td"))
    else {
        return Vec::new();
    };

    body.select(&row_selector)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| parse_cell(&cell))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn find_table_body<'a>(document: &'a Html, table_id: &str) -> Option<ElementRef<'a>> {
    let table_selector = Selector::parse(&format!(r#"table[id="{}"]"#, table_id)).ok()?;
    let body_selector = Selector::parse("tbody").ok()?;

    let table = document.select(&table_selector).next()?;
    table.select(&body_selector).next()
}

fn parse_cell(cell: &ElementRef) -> TableCell {
    let text = cell.text().collect::<String>().trim().to_string();

    let link = Selector::parse("a[href]").ok().and_then(|selector| {
        cell.select(&selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
    });

    TableCell { text, link }
}
