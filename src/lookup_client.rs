//! # Lookup Client
//!
//! JSON-over-HTTP GET with a per-request timeout, bounded retries with
//! exponential backoff and jitter, and a circuit breaker. Shared by the recipe
//! directory client and the recipe proxy client.

use crate::circuit_breaker::CircuitBreaker;
use crate::config::{DirectoryConfig, RecoveryConfig};
use crate::lookup_errors::LookupError;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("pantry/", env!("CARGO_PKG_VERSION"));

/// Delay before retry number `attempt + 1`: `base * 2^attempt` plus up to 25%
/// random jitter, never above `max_retry_delay_ms`.
pub fn calculate_retry_delay(attempt: u32, config: &RecoveryConfig) -> Duration {
    let exponential = config
        .base_retry_delay_ms
        .saturating_mul(1u64 << attempt.min(16))
        .min(config.max_retry_delay_ms);
    let jitter = rand::thread_rng().gen_range(0..=exponential / 4);
    Duration::from_millis(exponential.saturating_add(jitter).min(config.max_retry_delay_ms))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug)]
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
    recovery: RecoveryConfig,
    breaker: CircuitBreaker,
}

impl LookupClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recovery: config.recovery.clone(),
            breaker: CircuitBreaker::new(&config.recovery),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}/{path}?{query}` and decode the JSON body.
    ///
    /// Transient failures are retried up to `max_retries` times and counted by
    /// the circuit breaker; other failures return immediately.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut attempt = 0;

        loop {
            if self.breaker.is_open() {
                warn!(url = %url, "Circuit breaker open, skipping request");
                return Err(LookupError::CircuitOpen);
            }

            match self.send(&url, query).await {
                Ok(value) => {
                    self.breaker.record_success();
                    return Ok(value);
                }
                Err(err) if err.is_transient() => {
                    self.breaker.record_failure();
                    if attempt >= self.recovery.max_retries {
                        return Err(err);
                    }
                    let delay = calculate_retry_delay(attempt, &self.recovery);
                    let delay_ms = delay.as_millis();
                    warn!(url = %url, attempt, delay_ms, error = %err, "Retrying lookup");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, LookupError> {
        debug!(url, ?query, "Sending lookup request");
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(LookupError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_grows_and_is_capped() {
        let config = RecoveryConfig::default();

        let first = calculate_retry_delay(0, &config);
        assert!(first >= Duration::from_millis(250));
        assert!(first <= Duration::from_millis(250 + 62));

        let second = calculate_retry_delay(1, &config);
        assert!(second >= Duration::from_millis(500));

        for attempt in [5, 20, u32::MAX] {
            assert_eq!(calculate_retry_delay(attempt, &config), Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = LookupClient::new(&DirectoryConfig::with_base_url("http://localhost:1/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1/api");
    }
}
