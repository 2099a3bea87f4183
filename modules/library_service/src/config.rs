//! Configuration for the library service module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Library service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// OpenLibrary API root
    #[serde(default = "default_open_library_base_url")]
    pub open_library_base_url: String,

    /// Google Books API root
    #[serde(default = "default_google_books_base_url")]
    pub google_books_base_url: String,

    /// Optional Google Books API key, sent as `key=`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_books_api_key: Option<String>,

    /// Jikan (MyAnimeList) API root
    #[serde(default = "default_jikan_base_url")]
    pub jikan_base_url: String,

    #[serde(default = "default_true")]
    pub enable_open_library: bool,

    #[serde(default = "default_true")]
    pub enable_google_books: bool,

    #[serde(default = "default_true")]
    pub enable_jikan: bool,

    /// Timeout for every outbound metadata request
    #[serde(default = "default_http_timeout", with = "humantime_serde")]
    pub http_timeout: Duration,

    /// Minimum spacing between Jikan requests
    #[serde(default = "default_jikan_min_interval", with = "humantime_serde")]
    pub jikan_min_interval: Duration,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page size used when a request does not give one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_library_base_url: default_open_library_base_url(),
            google_books_base_url: default_google_books_base_url(),
            google_books_api_key: None,
            jikan_base_url: default_jikan_base_url(),
            enable_open_library: true,
            enable_google_books: true,
            enable_jikan: true,
            http_timeout: default_http_timeout(),
            jikan_min_interval: default_jikan_min_interval(),
            user_agent: default_user_agent(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_open_library_base_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_google_books_base_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_jikan_base_url() -> String {
    "https://api.jikan.moe/v4".to_string()
}

fn default_true() -> bool {
    true
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_jikan_min_interval() -> Duration {
    // Jikan allows 3 requests per second
    Duration::from_millis(350)
}

fn default_user_agent() -> String {
    format!("library-tracker/{}", env!("CARGO_PKG_VERSION"))
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.jikan_min_interval, Duration::from_millis(350));
        assert_eq!(config.default_page_size, 20);
        assert!(config.enable_jikan);
        assert!(config.user_agent.starts_with("library-tracker/"));
    }

    #[test]
    fn humantime_durations() {
        let config: Config =
            serde_json::from_str(r#"{"http_timeout": "2s", "jikan_min_interval": "1s 500ms"}"#)
                .unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(2));
        assert_eq!(config.jikan_min_interval, Duration::from_millis(1500));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"cache_size": 10}"#).is_err());
    }
}
