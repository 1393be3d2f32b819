//! hv-md
//!
//! Holdings source adapter.
//!
//! This crate owns the source abstraction and the HTTP source. It does
//! **not** validate or aggregate records; callers hand the raw list to
//! hv-portfolio.

pub mod outcome;
pub mod source;

use std::time::Duration;

use hv_portfolio::RawHolding;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use outcome::{fetch_or_empty, FetchOutcome, FetchStatus};
pub use source::{
    extract_holdings, FetchError, HoldingsSource, StaticHoldingsSource, DEFAULT_HOLDINGS_FIELD,
};

/// Endpoint the holdings screen has always read from.
pub const DEFAULT_ENDPOINT: &str = "https://json-jvjm.onrender.com/test";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP-backed holdings source: one GET against a fixed endpoint, no retry.
#[derive(Debug, Clone)]
pub struct HttpHoldingsSource {
    http: reqwest::Client,
    endpoint: String,
    holdings_field: String,
    timeout: Duration,
}

impl HttpHoldingsSource {
    pub fn new() -> Self {
        Self::new_with_endpoint(DEFAULT_ENDPOINT.to_string())
    }

    pub fn new_with_endpoint(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            holdings_field: DEFAULT_HOLDINGS_FIELD.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_holdings_field(mut self, field: impl Into<String>) -> Self {
        self.holdings_field = field.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_body(&self) -> Result<Value, FetchError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl Default for HttpHoldingsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HoldingsSource for HttpHoldingsSource {
    fn source_name(&self) -> &'static str {
        "http"
    }

    async fn fetch_holdings(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawHolding>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        debug!(endpoint = %self.endpoint, "GET holdings");

        // Dropping the request future aborts the in-flight call.
        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
            res = self.get_body() => res?,
        };

        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        extract_holdings(&body, &self.holdings_field)
    }
}

// -----------------
// Tests (no network)
// -----------------
