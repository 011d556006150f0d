use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::domain::{
    keyword_config::KeywordConfig,
    report::{KeywordResult, MonitorReport, UrlResult},
};

use super::SearchScraper;

const FIRST_PAGE: u32 = 1;

/// Checks whether target urls show up in the search results of their keywords
/// and writes the outcome to a json report.
pub struct KeywordMonitor<S> {
    scraper: S,
    config_path: PathBuf,
    results_path: PathBuf,
}

impl<S: SearchScraper> KeywordMonitor<S> {
    pub fn new(
        scraper: S,
        config_path: impl Into<PathBuf>,
        results_path: impl Into<PathBuf>,
    ) -> Self {
        KeywordMonitor {
            scraper,
            config_path: config_path.into(),
            results_path: results_path.into(),
        }
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    fn progress_bar(total: usize) -> ProgressBar {
        use std::io::IsTerminal;

        let pb = ProgressBar::new(total as u64);
        match std::io::stderr().is_terminal() {
            true => pb.set_draw_target(ProgressDrawTarget::stderr()),
            false => pb.set_draw_target(ProgressDrawTarget::hidden()),
        }
        if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_message("Searching keywords");
        pb
    }

    /// A missing config file means there is nothing to monitor.
    pub fn load_keywords(&self) -> anyhow::Result<KeywordConfig> {
        if !self.config_path.exists() {
            log::warn!(
                "Keyword config {} not found, nothing to monitor",
                self.config_path.display()
            );
            return Ok(KeywordConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read keyword config {}", self.config_path.display())
        })?;

        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse keyword config {}", self.config_path.display())
        })
    }

    pub fn save_results(&self, report: &MonitorReport) -> anyhow::Result<()> {
        if let Some(parent) = self.results_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create results directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.results_path, json).with_context(|| {
            format!("Failed to write results to {}", self.results_path.display())
        })
    }

    /// Loose containment in either direction, no url normalization.
    pub fn check_url_in_results(url: &str, search_urls: &[String]) -> bool {
        search_urls
            .iter()
            .any(|search_url| search_url.contains(url) || url.contains(search_url.as_str()))
    }

    /// Searches every configured keyword once and saves the report when all
    /// keywords are done. Only the first results page is ever requested.
    pub async fn monitor_keywords(&self, pages_to_check: u32) -> anyhow::Result<MonitorReport> {
        if pages_to_check != FIRST_PAGE {
            log::warn!(
                "pages_to_check={} ignored, only page {} is searched",
                pages_to_check,
                FIRST_PAGE
            );
        }

        let config = self.load_keywords()?;
        let mut report = MonitorReport::new();
        let total = config.keywords.len();

        log::info!(
            "Monitoring {} keywords with {} target urls",
            total,
            config.target_url_count()
        );

        let pb = Self::progress_bar(total);

        for item in config.keywords.iter() {
            log::info!("Searching keyword '{}'", item.keyword);

            let mut all_search_urls: Vec<String> = vec![];

            log::info!("  Searching page {}...", FIRST_PAGE);
            if let Some(page) = self
                .scraper
                .get_search_results(&item.keyword, FIRST_PAGE)
                .await
            {
                let page_urls = self.scraper.extract_urls(&page);
                log::info!("  Found {} urls on page {}", page_urls.len(), FIRST_PAGE);
                all_search_urls.extend(page_urls);
            }

            let urls = item
                .urls
                .iter()
                .map(|url| {
                    let is_exposed = Self::check_url_in_results(url, &all_search_urls);
                    let status = match is_exposed {
                        true => "exposed",
                        false => "not exposed",
                    };
                    log::info!("  Url '{}' - {}", url, status);

                    UrlResult {
                        url: url.clone(),
                        is_exposed,
                    }
                })
                .collect();

            report.results.push(KeywordResult {
                keyword: item.keyword.clone(),
                urls,
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        self.save_results(&report)?;
        log::info!("Saved monitoring results to {}", self.results_path.display());

        Ok(report)
    }
}
