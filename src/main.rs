use anyhow::Context;
use env_logger::Env;
use lookout::{
    configuration::get_configuration,
    services::{GoogleScraper, KeywordMonitor},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let scraper =
        GoogleScraper::new(configuration.scraper).context("Failed to build search client.")?;
    let monitor = KeywordMonitor::new(
        scraper,
        configuration.monitor.config_path,
        configuration.monitor.results_path,
    );

    let report = monitor
        .monitor_keywords(configuration.monitor.pages_to_check)
        .await?;

    log::info!(
        "{}/{} target urls exposed ({}), report at {}",
        report.exposed_count(),
        report.url_count(),
        report.timestamp,
        monitor.results_path().display()
    );

    Ok(())
}
