use crate::fetch::error::FetchError;
use crate::fetch::page_fetcher::PageFetcher;
use bon::bon;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// User agent sent when none is configured. The site serves desktop browsers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_2) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/43.0.2328.0 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How far into a body a `<meta charset>` declaration is looked for.
const META_SNIFF_LIMIT: usize = 1024;

/// Fetches pages over HTTP with a blocking `reqwest` client.
///
/// The body is decoded with the charset of the `Content-Type` header. When the
/// header names none, a charset declared in a `<meta>` tag near the top of the page
/// is used (older pages of the site are EUC-JP or Shift_JIS), and UTF-8 otherwise.
///
/// # Examples
///
/// ```no_run
/// # use soramame::{FetchError, HttpFetcher, PageFetcher};
/// # use std::time::Duration;
/// # fn main() -> Result<(), FetchError> {
/// let fetcher = HttpFetcher::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// let html = fetcher.fetch("http://soramame.taiki.go.jp/MstItiran.php")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

#[bon]
impl HttpFetcher {
    /// Creates a fetcher.
    ///
    /// # Arguments
    ///
    /// * `.user_agent(String)`: Optional. Defaults to [`DEFAULT_USER_AGENT`].
    /// * `.timeout(Duration)`: Optional. Whole-request timeout, defaults to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend cannot be initialised.
    #[builder]
    pub fn new(
        #[builder(into)] user_agent: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .map_err(|e| FetchError::Body(url.to_string(), e))?;
        Ok(decode_page(&body, content_type.as_deref()))
    }
}

/// Decodes a page body, preferring the header charset over a `<meta>` declaration.
fn decode_page(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(body))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        debug!("Body contained invalid {} sequences", used.name());
    }
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\''))
    })
}

fn sniff_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(|c| c == '"' || c == '\'')
        .chars()
        .take_while(|c| !matches!(c, '"' | '\'' | ';' | '>' | '/') && !c.is_whitespace())
        .collect();
    Encoding::for_label(label.as_bytes())
}
