//! Extracts the canonical attribute-name order from the station list title page.

use crate::extract::error::ExtractError;
use crate::extract::node::HtmlNode;
use scraper::{Html, Selector};
use std::sync::LazyLock;

const ATTRIBUTE_ROW_SELECTOR: &str = ".hyoMenu .hyoMenu_Komoku";

static ATTRIBUTE_ROW: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(ATTRIBUTE_ROW_SELECTOR).expect("Invalid attribute row selector")
});

/// Reads the attribute names heading the station list columns.
///
/// The names sit in the second header row of the title table, one element per
/// attribute. Each name is the trimmed text of that element's first child, or of
/// the whole element when the first child is blank (leading whitespace before the
/// name's markup).
///
/// # Errors
///
/// [`ExtractError::MissingElement`] when the page has fewer than two header rows.
pub fn parse_attribute_names(html: &str, url: &str) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    let row = HtmlNode::root(&document)
        .select(&ATTRIBUTE_ROW)
        .nth(1)
        .ok_or_else(|| ExtractError::MissingElement {
            url: url.to_string(),
            selector: format!("{} (second)", ATTRIBUTE_ROW_SELECTOR),
        })?;

    Ok(row.children().map(|cell| attribute_name(&cell)).collect())
}

fn attribute_name(cell: &HtmlNode) -> String {
    let name = cell.first_child_text();
    if name.is_empty() {
        cell.text()
    } else {
        name
    }
}
