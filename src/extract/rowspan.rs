//! Re-aligns a unit row beneath a header row that contains vertically merged cells.
//!
//! A header cell with `rowspan > 1` also occupies its column in the unit row, but
//! the unit row does not repeat it. Pairing cells by index would shift every unit
//! after that column one place to the left. Inserting a placeholder at the merged
//! cell's index restores the pairing.

use crate::extract::node::HtmlNode;
use crate::types::measurement::UNIT_PLACEHOLDER;
use log::debug;

/// Inserts a [`UNIT_PLACEHOLDER`] into `units` at the index of every header cell
/// whose span is greater than one, left to right.
///
/// `spans` holds one entry per header cell. An index past the end of `units`
/// appends the placeholder.
///
/// # Examples
///
/// ```
/// use soramame::align_units;
///
/// let units = vec!["ppm".to_string(), "mg/m3".to_string()];
/// let aligned = align_units(&[1, 2, 1], units);
/// assert_eq!(aligned, ["ppm", "_", "mg/m3"]);
/// ```
pub fn align_units(spans: &[usize], mut units: Vec<String>) -> Vec<String> {
    for (index, &span) in spans.iter().enumerate() {
        if span > 1 {
            debug!("Making room in unit row at column {} for rowspan {}", index, span);
            let at = index.min(units.len());
            units.insert(at, UNIT_PLACEHOLDER.to_string());
        }
    }
    units
}

/// Declared row span of a header cell. Missing or malformed values count as 1.
pub fn rowspan(cell: &HtmlNode) -> usize {
    cell.attribute("rowspan")
        .map(|value| {
            let digits: String = value
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().unwrap_or(1)
        })
        .unwrap_or(1)
}
