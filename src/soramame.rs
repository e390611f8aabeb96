//! This module provides the main entry point for reading the Soramame air-quality site.
//! It composes page fetching with the table extractors into four operations: listing
//! counties, listing attribute names, listing a county's stations and fetching a
//! station's measurement history.

use crate::error::SoramameError;
use crate::extract::attributes::parse_attribute_names;
use crate::extract::counties::parse_counties;
use crate::extract::measurement_header::parse_measurement_header;
use crate::extract::measurement_rows::parse_measurement_rows;
use crate::extract::stations::parse_county_stations;
use crate::fetch::error::FetchError;
use crate::fetch::http_fetcher::HttpFetcher;
use crate::fetch::page_fetcher::PageFetcher;
use crate::types::county::County;
use crate::types::history::StationHistory;
use crate::types::station::Station;
use crate::urls::SiteUrls;
use bon::bon;
use chrono::{DateTime, Utc};
use chrono_tz::Asia::Tokyo;
use chrono_tz::Tz;
use log::info;

/// The client for the Soramame site.
///
/// Each operation fetches one or more pages in sequence through the configured
/// [`PageFetcher`] and parses them in memory. The client holds no state between
/// calls; the attribute-name list returned by
/// [`list_station_attribute_names`](Soramame::list_station_attribute_names) is
/// passed back explicitly to
/// [`list_county_stations`](Soramame::list_county_stations).
///
/// # Examples
///
/// ```no_run
/// # use soramame::{Soramame, SoramameError};
/// # fn main() -> Result<(), SoramameError> {
/// let client = Soramame::new()?;
/// let attribute_names = client.list_station_attribute_names()?;
/// for county in client.list_counties()? {
///     let stations = client.list_county_stations(&county.id, &attribute_names)?;
///     println!("{}: {} stations", county.name, stations.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Soramame {
    fetcher: Box<dyn PageFetcher>,
    urls: SiteUrls,
    time: Option<DateTime<Tz>>,
}

#[bon]
impl Soramame {
    /// Creates a client that fetches pages over HTTP with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`SoramameError::Fetch`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, SoramameError> {
        let fetcher = HttpFetcher::builder().build()?;
        Ok(Self::with_fetcher(Box::new(fetcher)).build())
    }

    /// Creates a client around a custom [`PageFetcher`].
    ///
    /// # Arguments
    ///
    /// * `fetcher` - **Required.** Passed to `with_fetcher()`.
    /// * `.base_url(String)`: Optional. Defaults to [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    /// * `.time(DateTime<Tz>)`: Optional. Fixes the hour requested from the site.
    ///   When unset the current hour in Japan is used on every call.
    ///
    /// # Examples
    ///
    /// ```
    /// # use soramame::{HttpFetcher, Soramame, SoramameError};
    /// use chrono::TimeZone;
    /// use chrono_tz::Asia::Tokyo;
    ///
    /// # fn main() -> Result<(), SoramameError> {
    /// let client = Soramame::with_fetcher(Box::new(HttpFetcher::builder().build()?))
    ///     .base_url("http://localhost:8080")
    ///     .time(Tokyo.with_ymd_and_hms(2015, 3, 15, 17, 0, 0).unwrap())
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = with_fetcher, finish_fn = build)]
    pub fn from_parts(
        #[builder(start_fn)] fetcher: Box<dyn PageFetcher>,
        #[builder(into)] base_url: Option<String>,
        time: Option<DateTime<Tz>>,
    ) -> Self {
        Self {
            fetcher,
            urls: base_url.map(SiteUrls::new).unwrap_or_default(),
            time,
        }
    }

    /// Reads the attribute names heading the station list columns, in column order.
    ///
    /// # Errors
    ///
    /// * [`SoramameError::Fetch`] if the title page cannot be fetched.
    /// * [`SoramameError::Extract`] if the page lacks the attribute header row.
    pub fn list_station_attribute_names(&self) -> Result<Vec<String>, SoramameError> {
        let url = self.urls.station_title(&self.now());
        info!("Parsing station attributes {}", url);
        let html = self.fetch(&url)?;
        Ok(parse_attribute_names(&html, &url)?)
    }

    /// Lists the counties (prefectures) that host monitoring stations.
    ///
    /// # Errors
    ///
    /// Returns [`SoramameError::Fetch`] if the county page cannot be fetched.
    pub fn list_counties(&self) -> Result<Vec<County>, SoramameError> {
        let url = self.urls.county_list();
        info!("Fetching county list {}", url);
        let html = self.fetch(&url)?;
        Ok(parse_counties(&html))
    }

    /// Lists the stations of a county, labeling each station's support flags with
    /// `attribute_names`.
    ///
    /// # Arguments
    ///
    /// * `county_id` - A [`County::id`] as returned by [`list_counties`](Soramame::list_counties).
    /// * `attribute_names` - The list returned by
    ///   [`list_station_attribute_names`](Soramame::list_station_attribute_names).
    ///
    /// # Errors
    ///
    /// * [`SoramameError::Fetch`] if the station list cannot be fetched.
    /// * [`SoramameError::Extract`] with
    ///   [`ExtractError::AttributeCountMismatch`](crate::ExtractError::AttributeCountMismatch)
    ///   if any station row has a different number of attribute columns than
    ///   `attribute_names`. No stations are returned in that case.
    pub fn list_county_stations(
        &self,
        county_id: &str,
        attribute_names: &[String],
    ) -> Result<Vec<Station>, SoramameError> {
        let url = self.urls.station_list(county_id, &self.now());
        info!("Fetching county station list: {}", url);
        let html = self.fetch(&url)?;
        Ok(parse_county_stations(&html, &url, attribute_names)?)
    }

    /// Fetches the published measurement history of a station.
    ///
    /// Reads the measurement title page for the labels and units, then the data
    /// page for the records. A unit row that does not line up with the labels is
    /// logged and leaves placeholder units; the records are still returned.
    ///
    /// # Errors
    ///
    /// * [`SoramameError::Fetch`] if either page cannot be fetched.
    /// * [`SoramameError::Extract`] if the title page lacks its header table.
    pub fn list_station_measurement_history(
        &self,
        station_code: &str,
    ) -> Result<StationHistory, SoramameError> {
        let now = self.now();

        let title_url = self.urls.measurement_title(station_code, &now);
        info!("Fetching measurement header {}", title_url);
        let header = parse_measurement_header(&self.fetch(&title_url)?, &title_url)?;

        let data_url = self.urls.measurement_data(station_code, &now);
        info!("Fetching {}", data_url);
        let records = parse_measurement_rows(&self.fetch(&data_url)?, &header.labels());

        Ok(StationHistory {
            code: station_code.to_string(),
            header,
            records,
        })
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetcher.fetch(url)
    }

    fn now(&self) -> DateTime<Tz> {
        self.time.unwrap_or_else(|| Utc::now().with_timezone(&Tokyo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::error::ExtractError;
    use crate::types::measurement::UNIT_PLACEHOLDER;
    use crate::types::support::Support;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    const BASE_URL: &str = "http://soramame.test";

    /// Serves fixture pages by URL and records every request.
    #[derive(Default)]
    struct FixtureFetcher {
        pages: HashMap<String, String>,
        requested: Rc<RefCell<Vec<String>>>,
    }

    impl FixtureFetcher {
        fn page(mut self, path: &str, html: &str) -> Self {
            self.pages.insert(format!("{}{}", BASE_URL, path), html.to_string());
            self
        }
    }

    impl PageFetcher for FixtureFetcher {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Custom {
                url: url.to_string(),
                source: format!("no fixture for {}", url).into(),
            })
        }
    }

    fn fixtures() -> FixtureFetcher {
        FixtureFetcher::default()
            .page("/MstItiran.php", include_str!("../data/fixtures/county_list.html"))
            .page(
                "/MstItiranTitle.php?Time=2015031517",
                include_str!("../data/fixtures/station_title.html"),
            )
            .page(
                "/MstItiranHyou.php?Pref=44&Time=2015031517",
                include_str!("../data/fixtures/station_list.html"),
            )
            .page(
                "/DataListTitle.php?MstCode=44201010&Time=2015031517",
                include_str!("../data/fixtures/measurement_title.html"),
            )
            .page(
                "/DataListHyou.php?MstCode=44201010&Time=2015031517",
                include_str!("../data/fixtures/measurement_data.html"),
            )
    }

    fn client(fetcher: FixtureFetcher) -> Soramame {
        Soramame::with_fetcher(Box::new(fetcher))
            .base_url(BASE_URL)
            .time(Tokyo.with_ymd_and_hms(2015, 3, 15, 17, 12, 0).unwrap())
            .build()
    }

    #[test]
    fn test_list_counties() -> Result<(), SoramameError> {
        let counties = client(fixtures()).list_counties()?;
        let names: Vec<(&str, &str)> = counties
            .iter()
            .map(|county| (county.id.as_str(), county.name.as_str()))
            .collect();
        assert_eq!(names, [("13", "東京都"), ("14", "神奈川県"), ("44", "大分県")]);
        Ok(())
    }

    #[test]
    fn test_list_station_attribute_names() -> Result<(), SoramameError> {
        let names = client(fixtures()).list_station_attribute_names()?;
        assert_eq!(names, ["SO2", "NO", "NO2", "NOX", "OX", "SPM", "PM2.5"]);
        Ok(())
    }

    #[test]
    fn test_list_county_stations() -> Result<(), SoramameError> {
        let client = client(fixtures());
        let names = client.list_station_attribute_names()?;
        let stations = client.list_county_stations("44", &names)?;

        assert_eq!(stations.len(), 2, "blank filler row must be dropped");
        for station in &stations {
            assert_eq!(station.attributes.len(), names.len());
        }

        let city_hall = &stations[0];
        assert_eq!(city_hall.code, "44201010");
        assert_eq!(city_hall.name, "大分市役所");
        assert_eq!(city_hall.address, "大分市荷揚町２－３１");
        assert_eq!(city_hall.attributes.get("SO2"), Some(Support::Supported));
        assert_eq!(city_hall.attributes.get("PM2.5"), Some(Support::Unsupported));

        let school = &stations[1];
        assert_eq!(school.attributes.get("SO2"), Some(Support::Unsupported));
        assert_eq!(school.attributes.get("OX"), Some(Support::Unknown));
        Ok(())
    }

    #[test]
    fn test_list_county_stations_rejects_stale_attribute_names() {
        let names: Vec<String> = ["SO2", "NO"].iter().map(|name| name.to_string()).collect();
        let result = client(fixtures()).list_county_stations("44", &names);
        match result {
            Err(SoramameError::Extract(ExtractError::AttributeCountMismatch {
                url,
                expected,
                found,
                html,
                ..
            })) => {
                assert_eq!(url, format!("{}/MstItiranHyou.php?Pref=44&Time=2015031517", BASE_URL));
                assert_eq!(expected, 2);
                assert_eq!(found, 7);
                assert!(html.contains("44201010"));
            }
            other => panic!("expected attribute count mismatch, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_list_station_measurement_history() -> Result<(), SoramameError> {
        let history = client(fixtures()).list_station_measurement_history("44201010")?;
        assert_eq!(history.code, "44201010");

        let units = &history.header.label_units;
        assert_eq!(
            units.labels().collect::<Vec<_>>(),
            ["so2", "no", "no2", "nox", "ox", "spm", "pm2.5", "wd", "ws"]
        );
        assert_eq!(units.unit("so2"), Some("ppm"));
        assert_eq!(units.unit("pm2.5"), Some("μg/m3"));
        assert_eq!(units.unit("wd"), Some(UNIT_PLACEHOLDER));
        assert_eq!(units.unit("ws"), Some("m/s"));
        assert_eq!(history.header.functions.len(), 9);
        assert!(history.header.units_aligned);

        let records = &history.records;
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].published_at_iso(), "2015-03-15T00:00:00+09:00");
        assert_eq!(records[0].get("pm2.5"), Some(15.0));
        assert!(!records[0].contains("wd"));
        assert_eq!(records[0].get("ws"), Some(1.8));

        assert!(!records[1].contains("spm"));
        assert!(!records[1].contains("pm2.5"));
        assert_eq!(records[1].len(), 6);

        assert_eq!(records[2].published_at_iso(), "2015-03-15T17:00:00+09:00");
        assert_eq!(records[2].get("so2"), Some(0.004));
        assert_eq!(records[2].get("no"), Some(1.2));
        assert!(!records[2].contains("ws"));
        Ok(())
    }

    #[test]
    fn test_history_survives_misaligned_unit_row() -> Result<(), SoramameError> {
        let title = r#"<html><body>
            <table class="hyoMenu"><tr><td>1 Station</td></tr></table>
            <table class="hyoMenu">
              <tr><td>Date</td><td>Date</td><td>Date</td><td>Date</td><td rowspan="2">SO2</td><td>NO</td></tr>
              <tr><td>ppm</td></tr>
            </table></body></html>"#;
        let data = r#"<html><body><table class="hyoMenu">
              <tr><td>2015</td><td>3</td><td>15</td><td>17</td><td>0.004</td><td>1.2</td></tr>
            </table></body></html>"#;
        let fetcher = FixtureFetcher::default()
            .page("/DataListTitle.php?MstCode=1&Time=2015031517", title)
            .page("/DataListHyou.php?MstCode=1&Time=2015031517", data);

        let history = client(fetcher).list_station_measurement_history("1")?;

        assert!(!history.header.units_aligned);
        assert_eq!(history.header.label_units.unit("so2"), Some(UNIT_PLACEHOLDER));
        assert_eq!(history.records.len(), 1);
        assert_eq!(
            serde_json::to_value(&history.records[0]).unwrap(),
            serde_json::json!({"so2": 0.004, "no": 1.2, "published_at": "2015-03-15T17:00:00+09:00"})
        );
        Ok(())
    }

    #[test]
    fn test_history_requests_title_then_data_for_the_same_hour() -> Result<(), SoramameError> {
        let fetcher = fixtures();
        let requested = Rc::clone(&fetcher.requested);
        let soramame = Soramame::with_fetcher(Box::new(fetcher))
            .base_url(format!("{}/", BASE_URL))
            .time(Tokyo.with_ymd_and_hms(2015, 3, 15, 17, 59, 59).unwrap())
            .build();
        soramame.list_station_measurement_history("44201010")?;

        assert_eq!(
            *requested.borrow(),
            [
                format!("{}/DataListTitle.php?MstCode=44201010&Time=2015031517", BASE_URL),
                format!("{}/DataListHyou.php?MstCode=44201010&Time=2015031517", BASE_URL),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_transport_errors_propagate() {
        let result = client(FixtureFetcher::default()).list_counties();
        match result {
            Err(SoramameError::Fetch(FetchError::Custom { url, .. })) => {
                assert_eq!(url, format!("{}/MstItiran.php", BASE_URL));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    #[ignore = "requires network access to the live site"]
    fn test_live_county_list() -> Result<(), SoramameError> {
        let counties = Soramame::new()?.list_counties()?;
        assert!(!counties.is_empty());
        assert!(counties.iter().all(|county| county.id != "0"));
        Ok(())
    }
}
