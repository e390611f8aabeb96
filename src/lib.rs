mod error;
mod extract;
mod fetch;
mod soramame;
mod types;
mod urls;

pub use error::SoramameError;
pub use soramame::*;
pub use urls::*;

pub use fetch::error::FetchError;
pub use fetch::http_fetcher::*;
pub use fetch::page_fetcher::PageFetcher;

pub use extract::attributes::*;
pub use extract::cell::*;
pub use extract::counties::*;
pub use extract::error::ExtractError;
pub use extract::measurement_header::*;
pub use extract::measurement_rows::*;
pub use extract::node::HtmlNode;
pub use extract::rowspan::*;
pub use extract::stations::*;

pub use types::county::*;
pub use types::history::*;
pub use types::measurement::*;
pub use types::station::*;
pub use types::support::Support;
