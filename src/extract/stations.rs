//! Parses a county's station list into [`Station`] records.

use crate::extract::cell::classify_support;
use crate::extract::error::ExtractError;
use crate::extract::node::HtmlNode;
use crate::types::station::{Station, StationAttributes, StationRow};
use log::warn;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static STATION_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.hyoMenu tr").expect("Invalid station row selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("Invalid cell selector"));
static ATTRIBUTE_CELL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".MstHyo_Co, .MstHyo").expect("Invalid attribute cell selector")
});

/// Reads code, name, address and attribute flags from one `<tr>`.
///
/// Returns `None` for a row without any `<td>` (header rows, spacer rows).
pub fn parse_station_row(row: &HtmlNode) -> Option<StationRow> {
    let cells: Vec<HtmlNode> = row.select(&CELL).collect();
    if cells.is_empty() {
        return None;
    }
    let text_at = |index: usize| cells.get(index).map(HtmlNode::text).unwrap_or_default();

    Some(StationRow {
        code: text_at(0),
        name: text_at(1),
        address: text_at(2),
        flags: row
            .select(&ATTRIBUTE_CELL)
            .map(|cell| classify_support(&cell.text()))
            .collect(),
    })
}

/// Labels a row's flags with `attribute_names`.
///
/// # Errors
///
/// [`ExtractError::AttributeCountMismatch`] when the row has a different number of
/// attribute columns than there are names. This means the site changed its
/// column layout.
pub fn label_station_row(
    row: StationRow,
    attribute_names: &[String],
    url: &str,
    html: impl FnOnce() -> String,
) -> Result<Station, ExtractError> {
    if row.flags.len() != attribute_names.len() {
        return Err(ExtractError::AttributeCountMismatch {
            url: url.to_string(),
            expected: attribute_names.len(),
            found: row.flags.len(),
            station: Box::new(row),
            html: html(),
        });
    }
    Ok(Station {
        attributes: StationAttributes::zip(attribute_names, row.flags),
        code: row.code,
        name: row.name,
        address: row.address,
    })
}

/// Parses every station of a county station list page.
///
/// Rows without cells are skipped with a warning and blank filler rows (no code,
/// name or address) are dropped. `url` is only used for diagnostics.
///
/// # Errors
///
/// Fails on the first row whose attribute column count differs from
/// `attribute_names`. Stations parsed before that row are discarded.
pub fn parse_county_stations(
    html: &str,
    url: &str,
    attribute_names: &[String],
) -> Result<Vec<Station>, ExtractError> {
    let document = Html::parse_document(html);
    let mut stations = Vec::new();

    for row in HtmlNode::root(&document).select(&STATION_ROW) {
        let Some(parsed) = parse_station_row(&row) else {
            warn!("Empty station info, row: {}", row.html());
            continue;
        };
        let blank = parsed.is_blank();
        let station = label_station_row(parsed, attribute_names, url, || row.html())?;
        if blank {
            continue;
        }
        stations.push(station);
    }
    Ok(stations)
}
