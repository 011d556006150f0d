use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub monitor: MonitorSettings,
    pub scraper: ScraperSettings,
}

#[derive(Debug, Deserialize)]
pub struct MonitorSettings {
    pub config_path: PathBuf,
    pub results_path: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub pages_to_check: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub results_per_page: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub proxies: Vec<String>,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        ScraperSettings {
            base_url: "https://www.google.com/search".to_string(),
            timeout_secs: 30,
            results_per_page: 10,
            language: None,
            proxies: vec![],
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Reads settings from `./configuration`, picking the environment file from
/// `APP_ENVIRONMENT` (defaults to `local`).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine current dir: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    load_settings(&configuration_directory, &environment)
}

pub fn load_settings(
    configuration_directory: &Path,
    environment: &Environment,
) -> Result<Settings, ConfigError> {
    build_settings(configuration_directory, environment, environment_source())
}

// E.g. `APP_MONITOR__RESULTS_PATH=out/report.json` sets `monitor.results_path`
fn environment_source() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("scraper.proxies")
}

fn build_settings(
    configuration_directory: &Path,
    environment: &Environment,
    environment_source: config::Environment,
) -> Result<Settings, ConfigError> {
    let scraper_defaults = ScraperSettings::default();

    let settings = Config::builder()
        .set_default("monitor.config_path", "data/keywords.json")?
        .set_default("monitor.results_path", "results/monitor_results.json")?
        .set_default("monitor.pages_to_check", 1)?
        .set_default("scraper.base_url", scraper_defaults.base_url)?
        .set_default("scraper.timeout_secs", scraper_defaults.timeout_secs as i64)?
        .set_default(
            "scraper.results_per_page",
            scraper_defaults.results_per_page as i64,
        )?
        .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            File::from(configuration_directory.join(format!("{}.yaml", environment.as_str())))
                .required(false),
        )
        .add_source(environment_source)
        .build()?;

    settings.try_deserialize::<Settings>()
}
