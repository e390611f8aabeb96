//! Contains `StationHistory`, the result of fetching a station's measurement pages.

use crate::types::measurement::{MeasurementHeader, MeasurementRecord, PUBLISHED_AT};
use polars::prelude::{Column, DataFrame, PolarsResult};
use serde::Serialize;

/// The published measurement history of one station.
///
/// Records are in document order, which is the chronological order in which the
/// site publishes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationHistory {
    /// The station's site code.
    pub code: String,
    /// Labels, units and notes of the measurement table.
    pub header: MeasurementHeader,
    /// One record per published hour.
    pub records: Vec<MeasurementRecord>,
}

impl StationHistory {
    pub fn into_records(self) -> Vec<MeasurementRecord> {
        self.records
    }

    /// Converts the history into a Polars `DataFrame`.
    ///
    /// The frame has a `published_at` string column (ISO-8601 with offset) followed
    /// by one nullable `f64` column per header label, in header order. Values that
    /// were absent from a record are null in the frame.
    ///
    /// # Errors
    ///
    /// Returns a [`polars::prelude::PolarsError`] if the header carries duplicate
    /// labels, which cannot become distinct column names.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use soramame::Soramame;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Soramame::new()?;
    /// let history = client.list_station_measurement_history("44201010")?;
    /// let frame = history.to_frame()?;
    /// println!("{}", frame);
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let published: Vec<String> = self
            .records
            .iter()
            .map(MeasurementRecord::published_at_iso)
            .collect();

        let mut columns = Vec::with_capacity(self.header.label_units.len() + 1);
        columns.push(Column::new(PUBLISHED_AT.into(), published));
        for label in self.header.label_units.labels() {
            let values: Vec<Option<f64>> = self
                .records
                .iter()
                .map(|record| record.get(label))
                .collect();
            columns.push(Column::new(label.into(), values));
        }
        DataFrame::new(columns)
    }
}
