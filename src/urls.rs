//! URL templates of the pages the extractor reads.
//!
//! Every page except the county list takes a `Time` parameter, the current hour
//! in Japan formatted as `YYYYMMDDHH`. County ids and station codes are
//! percent-encoded into the query string.

use chrono::DateTime;
use chrono_tz::Tz;

pub const DEFAULT_BASE_URL: &str = "http://soramame.taiki.go.jp";

const COUNTY_LIST_PAGE: &str = "/MstItiran.php";
const STATION_LIST_PAGE: &str = "/MstItiranHyou.php";
const STATION_TITLE_PAGE: &str = "/MstItiranTitle.php";
const MEASUREMENT_TITLE_PAGE: &str = "/DataListTitle.php";
const MEASUREMENT_DATA_PAGE: &str = "/DataListHyou.php";

/// Builds page URLs against a base URL.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use chrono_tz::Asia::Tokyo;
/// use soramame::SiteUrls;
///
/// let urls = SiteUrls::new("http://soramame.taiki.go.jp/");
/// let at = Tokyo.with_ymd_and_hms(2015, 3, 15, 17, 30, 0).unwrap();
/// assert_eq!(
///     urls.measurement_data("44201010", &at),
///     "http://soramame.taiki.go.jp/DataListHyou.php?MstCode=44201010&Time=2015031517"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    base_url: String,
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SiteUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn county_list(&self) -> String {
        format!("{}{}", self.base_url, COUNTY_LIST_PAGE)
    }

    pub fn station_title(&self, at: &DateTime<Tz>) -> String {
        format!("{}{}?Time={}", self.base_url, STATION_TITLE_PAGE, time_param(at))
    }

    pub fn station_list(&self, county_id: &str, at: &DateTime<Tz>) -> String {
        format!(
            "{}{}?Pref={}&Time={}",
            self.base_url,
            STATION_LIST_PAGE,
            urlencoding::encode(county_id),
            time_param(at)
        )
    }

    pub fn measurement_title(&self, station_code: &str, at: &DateTime<Tz>) -> String {
        format!(
            "{}{}?MstCode={}&Time={}",
            self.base_url,
            MEASUREMENT_TITLE_PAGE,
            urlencoding::encode(station_code),
            time_param(at)
        )
    }

    pub fn measurement_data(&self, station_code: &str, at: &DateTime<Tz>) -> String {
        format!(
            "{}{}?MstCode={}&Time={}",
            self.base_url,
            MEASUREMENT_DATA_PAGE,
            urlencoding::encode(station_code),
            time_param(at)
        )
    }
}

fn time_param(at: &DateTime<Tz>) -> String {
    at.format("%Y%m%d%H").to_string()
}
