pub mod attributes;
pub mod cell;
pub mod counties;
pub mod error;
pub mod measurement_header;
pub mod measurement_rows;
pub mod node;
pub mod rowspan;
pub mod stations;

/// Leading year, month, day and hour columns of every measurement table.
pub(crate) const DATE_TIME_COLUMNS: usize = 4;
