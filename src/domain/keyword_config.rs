use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keywords to search for, each with the target urls expected to show up.
/// Fields other than `keywords`/`keyword`/`urls` are carried along untouched.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub keywords: Vec<KeywordItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordItem {
    pub keyword: String,
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KeywordConfig {
    pub fn target_url_count(&self) -> usize {
        self.keywords.iter().map(|item| item.urls.len()).sum()
    }
}
