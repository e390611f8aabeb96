//! Builds typed measurement records from a station's data page.

use crate::extract::cell::parse_numeric;
use crate::extract::node::HtmlNode;
use crate::extract::DATE_TIME_COLUMNS;
use crate::types::measurement::MeasurementRecord;
use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Asia::Tokyo;
use chrono_tz::Tz;
use log::{info, warn};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static DATA_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.hyoMenu tr").expect("Invalid data row selector"));

/// Builds the Asia/Tokyo timestamp of a reading, at minute zero.
///
/// The site numbers hours 1 to 24, so hour 24 is midnight of the following day.
/// Returns `None` for an invalid date or an hour above 24.
///
/// # Examples
///
/// ```
/// use soramame::published_at;
///
/// let at = published_at(2015, 3, 15, 24).unwrap();
/// assert_eq!(at.to_rfc3339(), "2015-03-16T00:00:00+09:00");
/// ```
pub fn published_at(year: i32, month: u32, day: u32, hour: u32) -> Option<DateTime<Tz>> {
    if hour > 24 {
        return None;
    }
    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    let local = midnight + Duration::hours(i64::from(hour));
    Tokyo.from_local_datetime(&local).single()
}

/// Turns one data row into a record.
///
/// The first four cells are year, month, day and hour; the rest are paired with
/// `labels` by position. Cells that are not numbers are left out of the record. A
/// short row pairs fewer labels and yields a smaller record.
///
/// Returns `None` if the row has fewer than four cells or they do not form a
/// valid date and hour.
pub fn parse_measurement_row<S: AsRef<str>>(cells: &[S], labels: &[String]) -> Option<MeasurementRecord> {
    if cells.len() < DATE_TIME_COLUMNS {
        return None;
    }
    let (date_time, values) = cells.split_at(DATE_TIME_COLUMNS);
    let field = |index: usize| date_time[index].as_ref().trim();

    let timestamp = published_at(
        field(0).parse().ok()?,
        field(1).parse().ok()?,
        field(2).parse().ok()?,
        field(3).parse().ok()?,
    )?;

    let mut record = MeasurementRecord::new(timestamp);
    for (label, value) in labels.iter().zip(values) {
        if let Some(value) = parse_numeric(value.as_ref()) {
            record.insert(label, value);
        }
    }
    Some(record)
}

/// Parses every row of a measurement data page, in document order.
///
/// Rows that do not start with a valid date and hour are skipped with a warning.
pub fn parse_measurement_rows(html: &str, labels: &[String]) -> Vec<MeasurementRecord> {
    let document = Html::parse_document(html);
    let rows: Vec<HtmlNode> = HtmlNode::root(&document).select(&DATA_ROW).collect();
    info!("Found {} records.", rows.len());

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row.children().map(|cell| cell.text()).collect();
        match parse_measurement_row(&cells, labels) {
            Some(record) => records.push(record),
            None => warn!("Skipping measurement row {} without a valid date: {:?}", index, cells),
        }
    }
    records
}
