/// One fetched page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub keyword: String,
    pub page_number: u32,
    pub page_source: String,
}
