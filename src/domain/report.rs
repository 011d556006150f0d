use chrono::Local;
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub timestamp: String,
    pub results: Vec<KeywordResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub urls: Vec<UrlResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlResult {
    pub url: String,
    pub is_exposed: bool,
}

impl Default for MonitorReport {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorReport {
    /// Empty report stamped with the current local time.
    pub fn new() -> Self {
        MonitorReport {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            results: vec![],
        }
    }

    pub fn exposed_count(&self) -> usize {
        self.results
            .iter()
            .flat_map(|result| result.urls.iter())
            .filter(|url| url.is_exposed)
            .count()
    }

    pub fn url_count(&self) -> usize {
        self.results.iter().map(|result| result.urls.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::{KeywordResult, MonitorReport, UrlResult, TIMESTAMP_FORMAT};

    #[test]
    fn new_report_timestamp_matches_format() {
        let report = MonitorReport::new();

        assert!(report.results.is_empty());
        assert_eq!(report.timestamp.len(), "2024-01-01 00:00:00".len());
        assert!(NaiveDateTime::parse_from_str(&report.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn counts_exposed_urls_across_keywords() {
        let report = MonitorReport {
            timestamp: "2024-05-01 09:30:00".to_string(),
            results: vec![
                KeywordResult {
                    keyword: "shoes".to_string(),
                    urls: vec![
                        UrlResult {
                            url: "shop.com/shoes".to_string(),
                            is_exposed: true,
                        },
                        UrlResult {
                            url: "shop.com/boots".to_string(),
                            is_exposed: false,
                        },
                    ],
                },
                KeywordResult {
                    keyword: "hats".to_string(),
                    urls: vec![UrlResult {
                        url: "shop.com/hats".to_string(),
                        is_exposed: true,
                    }],
                },
            ],
        };

        assert_eq!(report.exposed_count(), 2);
        assert_eq!(report.url_count(), 3);
    }

    #[test]
    fn serializes_with_expected_field_names() {
        let report = MonitorReport {
            timestamp: "2024-05-01 09:30:00".to_string(),
            results: vec![KeywordResult {
                keyword: "shoes".to_string(),
                urls: vec![UrlResult {
                    url: "shop.com/shoes".to_string(),
                    is_exposed: true,
                }],
            }],
        };

        let actual = serde_json::to_value(&report).unwrap();
        let expected = serde_json::json!({
            "timestamp": "2024-05-01 09:30:00",
            "results": [
                {"keyword": "shoes", "urls": [{"url": "shop.com/shoes", "is_exposed": true}]}
            ]
        });

        assert_eq!(actual, expected);
    }
}
