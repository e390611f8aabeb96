use crate::fetch::error::FetchError;

/// Retrieves the raw HTML of a page.
///
/// [`HttpFetcher`](crate::HttpFetcher) is the implementation used by
/// [`Soramame::new`](crate::Soramame::new). Other implementations can serve
/// pages from disk, a cache or fixtures.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}
