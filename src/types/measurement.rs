//! Measurement header and record types for a station's hourly history.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Unit recorded for a label whose header cell spans down into the unit row.
pub const UNIT_PLACEHOLDER: &str = "_";

/// Key reserved for the timestamp when a record is serialized.
pub const PUBLISHED_AT: &str = "published_at";

/// An ordered mapping from lower-cased measurement label (e.g. "so2") to its unit.
///
/// Labels whose header cell spans the unit row map to [`UNIT_PLACEHOLDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelUnitMap(Vec<(String, String)>);

impl LabelUnitMap {
    pub(crate) fn zip(labels: Vec<String>, units: Vec<String>) -> Self {
        Self(labels.into_iter().zip(units).collect())
    }

    /// Unit for `label`, or `None` if the label is not in the header.
    pub fn unit(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, unit)| unit.as_str())
    }

    /// Labels in column order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(label, unit)| (label.as_str(), unit.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for LabelUnitMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, unit) in &self.0 {
            map.serialize_entry(label, unit)?;
        }
        map.end()
    }
}

/// Parsed title page of a station's measurement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementHeader {
    /// Label of every measurement column, date/time columns excluded.
    pub label_units: LabelUnitMap,
    /// Raw text of the function/notes row, in document order and not aligned.
    pub functions: Vec<String>,
    /// False when the unit row could not be aligned with the labels. Every label
    /// then maps to [`UNIT_PLACEHOLDER`].
    pub units_aligned: bool,
}

impl MeasurementHeader {
    /// Labels in column order, as consumed by the record builder.
    pub fn labels(&self) -> Vec<String> {
        self.label_units.labels().map(str::to_string).collect()
    }
}

/// One published hourly reading of a station.
///
/// Only labels whose cell held a number are present, so the key set varies from
/// record to record. Serializes as a flat object of label to number plus a
/// `published_at` ISO-8601 timestamp with offset.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Publication hour in the station's local time zone (Asia/Tokyo).
    pub published_at: DateTime<Tz>,
    values: Vec<(String, f64)>,
}

impl MeasurementRecord {
    pub(crate) fn new(published_at: DateTime<Tz>) -> Self {
        Self {
            published_at,
            values: Vec::new(),
        }
    }

    /// Sets `label`, replacing an earlier value under the same label.
    pub(crate) fn insert(&mut self, label: &str, value: f64) {
        match self.values.iter_mut().find(|(name, _)| name == label) {
            Some(entry) => entry.1 = value,
            None => self.values.push((label.to_string(), value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Label/value pairs in column order.
    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The timestamp as ISO-8601 with a numeric offset, e.g. `2015-03-15T17:00:00+09:00`.
    pub fn published_at_iso(&self) -> String {
        self.published_at.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    }
}

impl Serialize for MeasurementRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        for (label, value) in &self.values {
            map.serialize_entry(label, value)?;
        }
        map.serialize_entry(PUBLISHED_AT, &self.published_at_iso())?;
        map.end()
    }
}
