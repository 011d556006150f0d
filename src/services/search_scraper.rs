use std::future::Future;

/// A source of search result pages, e.g. a search engine scraper.
pub trait SearchScraper {
    type Page;

    /// Fetches one page of results for `keyword`. `None` means nothing usable
    /// could be obtained, which is not treated as an error.
    fn get_search_results(
        &self,
        keyword: &str,
        page: u32,
    ) -> impl Future<Output = Option<Self::Page>> + Send;

    fn extract_urls(&self, page: &Self::Page) -> Vec<String>;
}
