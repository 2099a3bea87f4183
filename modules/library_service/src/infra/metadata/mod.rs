//! HTTP clients for third-party book metadata sources

pub mod google_books;
pub mod jikan;
pub mod open_library;

pub use google_books::GoogleBooksClient;
pub use jikan::JikanClient;
pub use open_library::OpenLibraryClient;

use crate::config::Config;
use crate::contract::MetadataSource;
use crate::domain::{MetadataProvider, MetadataProviders, NoOpMetadataProvider};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Metadata client errors
#[derive(Debug, Error)]
pub enum MetadataClientError {
    #[error("{source_name} request failed: {message}")]
    Network {
        source_name: MetadataSource,
        message: String,
    },

    #[error("{source_name} API error {status}: {body}")]
    Api {
        source_name: MetadataSource,
        status: u16,
        body: String,
    },

    #[error("{source_name} returned unreadable JSON: {message}")]
    Parse {
        source_name: MetadataSource,
        message: String,
    },
}

/// Shared reqwest client with the configured user agent and timeout
pub fn http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.http_timeout)
        .build()?;
    Ok(client)
}

/// Build the providers enabled in `config`; disabled sources never answer
pub fn build_providers(config: &Config) -> anyhow::Result<MetadataProviders> {
    let client = http_client(config)?;

    let open_library: Arc<dyn MetadataProvider> = if config.enable_open_library {
        Arc::new(OpenLibraryClient::new(
            client.clone(),
            &config.open_library_base_url,
        ))
    } else {
        Arc::new(NoOpMetadataProvider(MetadataSource::OpenLibrary))
    };
    let google_books: Arc<dyn MetadataProvider> = if config.enable_google_books {
        Arc::new(GoogleBooksClient::new(
            client.clone(),
            &config.google_books_base_url,
            config.google_books_api_key.clone(),
        ))
    } else {
        Arc::new(NoOpMetadataProvider(MetadataSource::GoogleBooks))
    };
    let jikan: Arc<dyn MetadataProvider> = if config.enable_jikan {
        Arc::new(JikanClient::new(
            client,
            &config.jikan_base_url,
            config.jikan_min_interval,
        ))
    } else {
        Arc::new(NoOpMetadataProvider(MetadataSource::Jikan))
    };

    tracing::info!(
        open_library = config.enable_open_library,
        google_books = config.enable_google_books,
        jikan = config.enable_jikan,
        "Metadata sources configured"
    );

    Ok(MetadataProviders {
        open_library,
        google_books,
        jikan,
    })
}

/// GET `url` and decode JSON; 404 maps to `None`
pub(crate) async fn get_json<T: DeserializeOwned>(
    source: MetadataSource,
    request: reqwest::RequestBuilder,
) -> Result<Option<T>, MetadataClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| MetadataClientError::Network {
            source_name: source,
            message: e.to_string(),
        })?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MetadataClientError::Api {
            source_name: source,
            status: status.as_u16(),
            body,
        });
    }

    let body = response
        .json::<T>()
        .await
        .map_err(|e| MetadataClientError::Parse {
            source_name: source,
            message: e.to_string(),
        })?;
    Ok(Some(body))
}

pub(crate) fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Non-empty trimmed string
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Join names the way sources list multiple authors
pub(crate) fn join_names<I: IntoIterator<Item = String>>(names: I) -> Option<String> {
    let names: Vec<String> = names
        .into_iter()
        .filter_map(|n| non_blank(Some(n)))
        .collect();
    (!names.is_empty()).then(|| names.join(", "))
}

/// Enforces a minimum spacing between requests
pub(crate) struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait if necessary to comply with the rate limit
    pub(crate) async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_blank_names() {
        assert_eq!(
            join_names(vec!["Ursula K. Le Guin".into(), " ".into(), "Ted Chiang".into()]),
            Some("Ursula K. Le Guin, Ted Chiang".into())
        );
        assert_eq!(join_names(Vec::<String>::new()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(350));
        let start = tokio::time::Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(700));
    }
}
