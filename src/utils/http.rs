use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to fetch {url} after {attempts} attempts: {reason}")]
    Exhausted {
        url: String,
        attempts: u32,
        reason: String,
    },
    #[error("Failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        self.backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

pub fn create_client(config: &Config) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .cookie_store(true)
        .build()
}

/// GETs `url` and returns its body, retrying any response other than 200 OK.
///
/// Makes one request plus up to `max_retries` retries.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    policy: &RetryPolicy,
) -> Result<String, FetchError> {
    let attempts = policy.max_retries + 1;
    let mut attempt = 0;
    let mut reason = String::new();

    while attempt < attempts {
        attempt += 1;

        match client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!("Fetched {} (attempt {}/{})", url, attempt, attempts);
                return response.text().await.map_err(|source| FetchError::Body {
                    url: url.to_string(),
                    source,
                });
            }
            Ok(response) => {
                reason = format!("HTTP error {}", response.status());
            }
            Err(e) => {
                reason = format!("request failed: {}", e);
            }
        }

        let remaining = attempts - attempt;
        if remaining > 0 {
            warn!("{} for {}, trying again ({} left)...", reason, url, remaining);
            let delay = policy.delay(attempt);
            if !delay.is_zero() {
                sleep(delay).await;
            }
        }
    }

    error!("Giving up on {} after {} attempts: {}", url, attempts, reason);
    Err(FetchError::Exhausted {
        url: url.to_string(),
        attempts,
        reason,
    })
}
