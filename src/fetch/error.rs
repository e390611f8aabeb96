use thiserror::Error;

/// A page could not be retrieved. Nothing in this crate retries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),

    // Raised by fetchers other than `HttpFetcher`
    #[error("Fetching {url} failed")]
    Custom {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
