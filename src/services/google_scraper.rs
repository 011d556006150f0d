use std::{collections::HashSet, time::Duration};

use rand::seq::SliceRandom;
use reqwest::{Client, Proxy};
use scraper::{Html, Selector};
use serde::Serialize;

use crate::{
    configuration::ScraperSettings,
    domain::{
        html_tag::{extract_result_url, HtmlTag},
        search_page::SearchPage,
    },
};

use super::SearchScraper;

pub enum GoogleSearchResult {
    NotFound,
    Results(SearchPage),
    CaptchaBlocked,
}

#[derive(Serialize)]
struct GoogleQuery<'a> {
    q: &'a str,
    start: u32,
    num: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    hl: Option<&'a str>,
}

/// One search session: the client, its cookie jar, user agent and proxy are
/// shared by every request this scraper makes.
pub struct GoogleScraper {
    client: Client,
    settings: ScraperSettings,
}

impl GoogleScraper {
    pub fn new(settings: ScraperSettings) -> reqwest::Result<Self> {
        let client = build_client(&settings)?;

        Ok(GoogleScraper { client, settings })
    }

    async fn fetch_page(&self, keyword: &str, page: u32) -> reqwest::Result<String> {
        let query = GoogleQuery {
            q: keyword,
            start: page.saturating_sub(1) * self.settings.results_per_page,
            num: self.settings.results_per_page,
            hl: self.settings.language.as_deref(),
        };

        self.client
            .get(&self.settings.base_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl SearchScraper for GoogleScraper {
    type Page = SearchPage;

    async fn get_search_results(&self, keyword: &str, page: u32) -> Option<SearchPage> {
        let html_content = match self.fetch_page(keyword, page).await {
            Ok(html_content) => html_content,
            Err(e) => {
                log::error!("Search request for '{}' failed. Error: {:?}", keyword, e);
                return None;
            }
        };

        match classify_search_page(keyword, page, html_content) {
            GoogleSearchResult::Results(search_page) => Some(search_page),
            GoogleSearchResult::NotFound => {
                log::warn!("Found no results on query: {}", keyword);
                None
            }
            GoogleSearchResult::CaptchaBlocked => {
                log::error!("Blocked by captcha on query: {}", keyword);
                None
            }
        }
    }

    fn extract_urls(&self, page: &SearchPage) -> Vec<String> {
        let urls = extract_result_urls(&page.page_source);
        log::debug!(
            "Extracted {} result urls for '{}' from page {}",
            urls.len(),
            page.keyword,
            page.page_number
        );
        urls
    }
}

fn build_client(settings: &ScraperSettings) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .user_agent(fake_user_agent::get_rua())
        .cookie_store(true)
        .timeout(Duration::from_secs(settings.timeout_secs));

    if let Some(proxy) = settings.proxies.choose(&mut rand::thread_rng()) {
        log::info!("Searching through proxy {}", proxy);
        builder = builder.proxy(Proxy::http(proxy)?).proxy(Proxy::https(proxy)?);
    }

    builder.build()
}

/// A results page always carries `<h3>` headings; without them the page is
/// either an empty result set or a captcha/consent wall.
pub fn classify_search_page(
    keyword: &str,
    page_number: u32,
    html_content: String,
) -> GoogleSearchResult {
    let h3_selector = Selector::parse("h3").expect("h3 is a valid selector");
    let html_document = Html::parse_document(&html_content);

    let heading_count = html_document.select(&h3_selector).count();

    match heading_count == 0 {
        true => match html_content.contains("did not match any documents") {
            true => GoogleSearchResult::NotFound,
            false => GoogleSearchResult::CaptchaBlocked,
        },
        false => {
            log::debug!(
                "Found {} result headings for '{}' on page {}",
                heading_count,
                keyword,
                page_number
            );
            GoogleSearchResult::Results(SearchPage {
                keyword: keyword.to_string(),
                page_number,
                page_source: html_content,
            })
        }
    }
}

/// Result urls in page order, without duplicates.
pub fn extract_result_urls(page_source: &str) -> Vec<String> {
    let a_tag_selector = Selector::parse("a").expect("a is a valid selector");
    let html_document = Html::parse_document(page_source);
    let mut seen = HashSet::new();

    html_document
        .select(&a_tag_selector)
        .filter_map(|tag| tag.value().attr("href"))
        .filter_map(|href| extract_result_url(HtmlTag::ATag(href.to_string())))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
