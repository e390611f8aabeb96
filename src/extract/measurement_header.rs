//! Builds the label/unit header of a station's measurement table.
//!
//! The title page carries the header in the second `table.hyoMenu`, as three rows:
//! element names, units and function notes. The first four columns are the
//! year, month, day and hour of the reading and have no unit.

use crate::extract::error::ExtractError;
use crate::extract::node::HtmlNode;
use crate::extract::rowspan::{align_units, rowspan};
use crate::extract::DATE_TIME_COLUMNS;
use crate::types::measurement::{LabelUnitMap, MeasurementHeader, UNIT_PLACEHOLDER};
use log::warn;
use scraper::{Html, Selector};
use std::sync::LazyLock;

const HEADER_TABLE_SELECTOR: &str = "table.hyoMenu";

static HEADER_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(HEADER_TABLE_SELECTOR).expect("Invalid header table selector")
});
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("Invalid row selector"));

/// Pairs labels with aligned units.
///
/// # Errors
///
/// [`ExtractError::UnitAlignment`] if there is not exactly one unit per label.
pub fn label_units(
    labels: Vec<String>,
    units: Vec<String>,
    url: &str,
) -> Result<LabelUnitMap, ExtractError> {
    if units.len() != labels.len() {
        return Err(ExtractError::UnitAlignment {
            url: url.to_string(),
            labels,
            units,
        });
    }
    Ok(LabelUnitMap::zip(labels, units))
}

/// Parses a measurement title page into labels, aligned units and notes.
///
/// Labels are lower-cased. Units are re-aligned under their labels with
/// [`align_units`], so a label whose header cell spans the unit row gets the
/// `"_"` placeholder.
///
/// Records only depend on the labels, so a unit row that cannot be aligned is
/// logged as an [`ExtractError::UnitAlignment`] warning rather than returned. The
/// header then maps every label to the placeholder and has
/// [`units_aligned`](MeasurementHeader::units_aligned) unset.
///
/// # Errors
///
/// [`ExtractError::MissingElement`] if the second header table, or its element or
/// unit row, is absent.
pub fn parse_measurement_header(html: &str, url: &str) -> Result<MeasurementHeader, ExtractError> {
    let document = Html::parse_document(html);
    let missing = |selector: &str| ExtractError::MissingElement {
        url: url.to_string(),
        selector: selector.to_string(),
    };

    let table = HtmlNode::root(&document)
        .select(&HEADER_TABLE)
        .nth(1)
        .ok_or_else(|| missing("table.hyoMenu (second)"))?;
    let rows: Vec<HtmlNode> = table.select(&ROW).collect();
    let element_row = rows.first().ok_or_else(|| missing("table.hyoMenu tr (elements)"))?;
    let unit_row = rows.get(1).ok_or_else(|| missing("table.hyoMenu tr (units)"))?;

    let element_cells: Vec<HtmlNode> = element_row.children().collect();
    let labels: Vec<String> = element_cells
        .iter()
        .skip(DATE_TIME_COLUMNS)
        .map(|cell| cell.text().to_ascii_lowercase())
        .collect();

    let spans: Vec<usize> = element_cells.iter().map(rowspan).collect();
    let units: Vec<String> = align_units(&spans, unit_row.children().map(|cell| cell.text()).collect())
        .into_iter()
        .skip(DATE_TIME_COLUMNS)
        .collect();

    let (pairs, units_aligned) = match label_units(labels.clone(), units, url) {
        Ok(pairs) => (pairs, true),
        Err(error) => {
            warn!("{}", error);
            let placeholders = vec![UNIT_PLACEHOLDER.to_string(); labels.len()];
            (LabelUnitMap::zip(labels, placeholders), false)
        }
    };

    let functions = rows
        .get(2)
        .map(|row| row.children().map(|cell| cell.text()).collect())
        .unwrap_or_default();

    Ok(MeasurementHeader {
        label_units: pairs,
        functions,
        units_aligned,
    })
}
