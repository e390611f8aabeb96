use crate::types::station::StationRow;
use thiserror::Error;

/// The page does not have the shape the extractor expects.
///
/// These are fatal for the page being parsed. Every variant carries the URL of the
/// page so the offending document can be fetched again for diagnosis.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Station row has {found} attribute columns but {expected} attribute names are known, page {url}")]
    AttributeCountMismatch {
        url: String,
        expected: usize,
        found: usize,
        /// The row as parsed before labeling.
        station: Box<StationRow>,
        /// Markup of the offending `<tr>`.
        html: String,
    },

    #[error("Aligned unit row has {} entries but the header has {} labels, page {url}", .units.len(), .labels.len())]
    UnitAlignment {
        url: String,
        labels: Vec<String>,
        units: Vec<String>,
    },

    #[error("Required element '{selector}' not found on page {url}")]
    MissingElement { url: String, selector: String },
}
