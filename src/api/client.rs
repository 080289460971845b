//! HTTP client for the odds backend.

use super::{ArbItem, EvItem, FairQuote, FeedQuery, MatchSummary, OddsApi, OddsQuote};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Static credential header expected by the backend.
const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the key sent as `X-API-Key`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// REST client for the odds backend.
pub struct ApiClient {
    /// Base URL without trailing slash.
    base_url: String,
    /// Shared HTTP client with timeout and credential header applied.
    http: reqwest::Client,
    /// Rate limiter state.
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(Self::default_headers(config.api_key.as_deref())?)
            .user_agent(concat!("oddsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.rate_limit))),
        })
    }

    fn default_headers(api_key: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| Error::config(format!("invalid API key: {e}")))?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }
        Ok(headers)
    }

    /// Absolute URL for an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.rate_limit().await;

        let url = self.endpoint(path);
        tracing::debug!(url = %url, ?query, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(Error::RateLimited(retry_after));
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Apply rate limiting.
    async fn rate_limit(&self) {
        let mut limiter = self.rate_limiter.lock().await;
        limiter.wait().await;
    }
}

#[async_trait]
impl OddsApi for ApiClient {
    async fn health(&self) -> Result<()> {
        let _: serde_json::Value = self.get_json("/", &[]).await?;
        Ok(())
    }

    async fn fetch_matches(
        &self,
        league: Option<String>,
        hours: Option<u32>,
    ) -> Result<Vec<MatchSummary>> {
        let mut query: Vec<(&str, String)> = league.into_iter().map(|l| ("league", l)).collect();
        query.extend(hours.map(|h| ("hours", h.to_string())));
        let matches: Vec<MatchSummary> = self.get_json("/api/matches", &query).await?;
        tracing::debug!(count = matches.len(), "fetched matches");
        Ok(matches)
    }

    async fn fetch_odds(&self, match_id: i64) -> Result<Vec<OddsQuote>> {
        self.get_json(&format!("/api/odds/{match_id}"), &[]).await
    }

    async fn fetch_fair(&self, match_id: i64) -> Result<Vec<FairQuote>> {
        self.get_json(&format!("/api/fair/{match_id}"), &[]).await
    }

    async fn fetch_top_ev(&self, query: FeedQuery) -> Result<Vec<EvItem>> {
        self.get_json("/api/ev/top", &query.to_query()).await
    }

    async fn fetch_latest_arbs(&self, query: FeedQuery) -> Result<Vec<ArbItem>> {
        self.get_json("/api/arbs/latest", &query.to_query()).await
    }
}

/// Token-bucket rate limiter. A rate of zero disables limiting.
struct RateLimiter {
    requests_per_second: u32,
    last_request: Instant,
    tokens: f64,
}

impl RateLimiter {
    fn new(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            last_request: Instant::now(),
            tokens: requests_per_second as f64,
        }
    }

    async fn wait(&mut self) {
        if self.requests_per_second == 0 {
            return;
        }
        let rate = self.requests_per_second as f64;
        let elapsed = self.last_request.elapsed().as_secs_f64();

        // Replenish tokens
        self.tokens = (self.tokens + elapsed * rate).min(rate);

        if self.tokens < 1.0 {
            let wait_time = (1.0 - self.tokens) / rate;
            tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
            self.tokens = 1.0;
        }

        self.tokens -= 1.0;
        self.last_request = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClientBuilder::new()
            .config(ApiConfig {
                base_url: base_url.to_string(),
                ..ApiConfig::default()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        assert_eq!(
            client("http://odds.local/").endpoint("/api/odds/4"),
            "http://odds.local/api/odds/4"
        );
        assert_eq!(
            client("http://odds.local").endpoint("api/fair/4"),
            "http://odds.local/api/fair/4"
        );
    }

    #[test]
    fn test_api_key_header() {
        let headers = ApiClient::default_headers(Some("k-123")).unwrap();
        assert_eq!(headers.get("x-api-key").unwrap(), "k-123");
        assert!(headers.get("x-api-key").unwrap().is_sensitive());

        assert!(ApiClient::default_headers(Some("")).unwrap().is_empty());
        assert!(ApiClient::default_headers(None).unwrap().is_empty());
        assert!(matches!(
            ApiClient::default_headers(Some("bad\nkey")),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(2);
        let start = Instant::now();
        for _ in 0..4 {
            limiter.wait().await;
        }
        // Two burst tokens, then one request per half second.
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_disabled() {
        let mut limiter = RateLimiter::new(0);
        let start = Instant::now();
        for _ in 0..50 {
            limiter.wait().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
