//! Cell-level classification: support glyphs and numeric readings.

use crate::types::support::Support;

/// Glyph marking an attribute the station reports.
pub const SUPPORTED_GLYPH: char = '○';
/// Glyph marking an attribute the station does not report.
pub const UNSUPPORTED_GLYPH: char = '×';

/// Classifies an attribute cell's text.
///
/// The presence glyph wins when both glyphs appear. Text with neither glyph is
/// [`Support::Unknown`]; this never fails.
///
/// # Examples
///
/// ```
/// use soramame::{classify_support, Support};
///
/// assert_eq!(classify_support(" ○ "), Support::Supported);
/// assert_eq!(classify_support("×"), Support::Unsupported);
/// assert_eq!(classify_support(""), Support::Unknown);
/// ```
pub fn classify_support(text: &str) -> Support {
    if text.contains(SUPPORTED_GLYPH) {
        Support::Supported
    } else if text.contains(UNSUPPORTED_GLYPH) {
        Support::Unsupported
    } else {
        Support::Unknown
    }
}

/// Parses a measurement cell as a number.
///
/// Accepts an optional sign, digits with an optional fraction and an optional
/// exponent, with surrounding whitespace. Placeholders such as `-`, `--`, `#` or
/// an empty cell yield `None`, as do `NaN` and `inf`.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let text = text.trim();
    let mantissa_end = text.find(['e', 'E']).unwrap_or(text.len());
    let (mantissa, exponent) = text.split_at(mantissa_end);

    let digits = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    if !exponent.is_empty() {
        let exponent = &exponent[1..];
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if exponent.is_empty() || !is_digits(exponent) {
            return None;
        }
    }

    text.parse().ok()
}
