pub mod error;
pub mod http_fetcher;
pub mod page_fetcher;
