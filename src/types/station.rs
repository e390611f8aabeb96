//! Defines the data structures representing Soramame monitoring stations and the
//! per-station attribute support flags.

use crate::types::support::Support;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Represents a single monitoring station listed on a county's station page.
///
/// `attributes` always has exactly one entry per name in the attribute-name list
/// the station page was parsed against, in the same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    /// The site code (e.g. "44201010").
    pub code: String,
    /// The station name, as published.
    pub name: String,
    /// The street address of the station.
    pub address: String,
    /// Support flag for every attribute, keyed by attribute name.
    pub attributes: StationAttributes,
}

/// A row of the station list before its flags are labeled with attribute names.
///
/// This is the partially-built record attached to
/// [`ExtractError::AttributeCountMismatch`](crate::ExtractError::AttributeCountMismatch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRow {
    pub code: String,
    pub name: String,
    pub address: String,
    /// Classified attribute cells, in column order.
    pub flags: Vec<Support>,
}

impl StationRow {
    /// Blank filler rows carry no code, name or address.
    pub fn is_blank(&self) -> bool {
        self.code.is_empty() && self.name.is_empty() && self.address.is_empty()
    }
}

/// An ordered mapping from attribute name to [`Support`].
///
/// Order follows the attribute-name list of the station title page. Serialized as a
/// JSON object with keys in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationAttributes(Vec<(String, Support)>);

impl StationAttributes {
    /// Pairs names with flags positionally. Callers check lengths beforehand.
    pub(crate) fn zip(names: &[String], flags: Vec<Support>) -> Self {
        Self(names.iter().cloned().zip(flags).collect())
    }

    /// Looks up the flag for `name`, if the attribute exists.
    pub fn get(&self, name: &str) -> Option<Support> {
        self.0
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, support)| *support)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Support)> {
        self.0.iter().map(|(name, support)| (name.as_str(), *support))
    }

    /// Names of the attributes marked as supported.
    pub fn supported(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, support)| support.is_supported())
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Support)> for StationAttributes {
    fn from_iter<I: IntoIterator<Item = (S, Support)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, support)| (name.into(), support)).collect())
    }
}

impl Serialize for StationAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, support) in &self.0 {
            map.serialize_entry(name, support)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes() -> StationAttributes {
        [
            ("so2", Support::Supported),
            ("no", Support::Unsupported),
            ("ox", Support::Unknown),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_get_by_name() {
        let attributes = attributes();
        assert_eq!(attributes.get("so2"), Some(Support::Supported));
        assert_eq!(attributes.get("ox"), Some(Support::Unknown));
        assert_eq!(attributes.get("pm2.5"), None);
        assert_eq!(attributes.supported().collect::<Vec<_>>(), ["so2"]);
    }

    #[test]
    fn test_station_serializes_attributes_as_object() {
        let station = Station {
            code: "44201010".to_string(),
            name: "Station A".to_string(),
            address: "1-2-3 Somewhere".to_string(),
            attributes: attributes(),
        };
        assert_eq!(
            serde_json::to_value(&station).unwrap(),
            json!({
                "code": "44201010",
                "name": "Station A",
                "address": "1-2-3 Somewhere",
                "attributes": {"so2": true, "no": false, "ox": null}
            })
        );
    }

    #[test]
    fn test_blank_row_detection() {
        let mut row = StationRow {
            code: String::new(),
            name: String::new(),
            address: String::new(),
            flags: vec![Support::Unknown],
        };
        assert!(row.is_blank());
        row.address = "somewhere".to_string();
        assert!(!row.is_blank());
    }
}
