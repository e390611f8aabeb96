//! Tri-state flag describing whether a station reports a given attribute.

use serde::{Serialize, Serializer};

/// Whether a monitoring station supports (reports) a measurement attribute.
///
/// The station list marks each attribute column with a glyph: `○` for supported
/// and `×` for unsupported. Cells carrying neither glyph are [`Support::Unknown`],
/// which is a normal outcome and not an error.
///
/// # Examples
///
/// ```
/// use soramame::Support;
///
/// assert_eq!(Support::Supported.as_bool(), Some(true));
/// assert_eq!(Support::Unsupported.as_bool(), Some(false));
/// assert_eq!(Support::Unknown.as_bool(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Support {
    /// The presence glyph (`○`) was found in the cell.
    Supported,
    /// The absence glyph (`×`) was found in the cell.
    Unsupported,
    /// Neither glyph was present.
    Unknown,
}

impl Support {
    /// Collapses the flag into an optional boolean, `None` meaning unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Support::Supported => Some(true),
            Support::Unsupported => Some(false),
            Support::Unknown => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self == Support::Supported
    }
}

impl From<Option<bool>> for Support {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Support::Supported,
            Some(false) => Support::Unsupported,
            None => Support::Unknown,
        }
    }
}

/// Serialized as `true`, `false` or `null`.
impl Serialize for Support {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}
