//! Source boundary for holdings ingestion.
//!
//! This module defines the source trait, its error type, the shared body
//! extraction rule and an in-memory source. The HTTP implementation lives in
//! `lib.rs`; the fail-soft wrapper lives in `outcome.rs`.

use std::fmt;

use hv_portfolio::RawHolding;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Response field that carries the holdings array.
pub const DEFAULT_HOLDINGS_FIELD: &str = "userHolding";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that a [`HoldingsSource`] may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network or transport failure.
    Transport(String),
    /// The endpoint answered with a non-2xx status.
    Status { code: u16 },
    /// The body could not be decoded as JSON of the expected shape.
    ///
    /// Decoding is all-or-nothing: a single number outside f64 range (e.g.
    /// `1e400`) in any record fails the whole body, so the screen shows an
    /// empty list rather than the remaining records.
    Decode(String),
    /// The body has no holdings field.
    MissingField(String),
    /// The caller cancelled the fetch.
    Cancelled,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            FetchError::Status { code } => write!(f, "http error status={code}"),
            FetchError::Decode(msg) => write!(f, "decode error: {msg}"),
            FetchError::MissingField(field) => {
                write!(f, "response has no '{field}' field")
            }
            FetchError::Cancelled => write!(f, "fetch cancelled"),
        }
    }
}

impl std::error::Error for FetchError {}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Upstream holdings source contract.
///
/// Object safe, so callers can hold an `Arc<dyn HoldingsSource>`.
#[async_trait::async_trait]
pub trait HoldingsSource: Send + Sync {
    /// Short name for logs (e.g. `"http"`).
    fn source_name(&self) -> &'static str;

    /// Fetch the raw holdings list once.
    ///
    /// Must return [`FetchError::Cancelled`] instead of a result once
    /// `cancel` has fired. Records are returned unvalidated, in source order.
    async fn fetch_holdings(&self, cancel: &CancellationToken)
        -> Result<Vec<RawHolding>, FetchError>;
}

/// Pull the holdings array out of a response body.
pub fn extract_holdings(body: &Value, field: &str) -> Result<Vec<RawHolding>, FetchError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(FetchError::MissingField(field.to_string())),
        Some(Value::Array(items)) => Ok(items.iter().cloned().map(RawHolding::new).collect()),
        Some(other) => Err(FetchError::Decode(format!(
            "field '{field}' is not an array (got {})",
            json_kind(other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A source backed by a response body already held in memory, e.g. a saved
/// copy of the endpoint's answer.
#[derive(Debug, Clone)]
pub struct StaticHoldingsSource {
    body: Value,
    holdings_field: String,
}

impl StaticHoldingsSource {
    pub fn new(body: Value, holdings_field: impl Into<String>) -> Self {
        Self {
            body,
            holdings_field: holdings_field.into(),
        }
    }

    pub fn from_json_str(raw: &str, holdings_field: impl Into<String>) -> Result<Self, FetchError> {
        let body: Value =
            serde_json::from_str(raw).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(Self::new(body, holdings_field))
    }
}

#[async_trait::async_trait]
impl HoldingsSource for StaticHoldingsSource {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn fetch_holdings(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawHolding>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        extract_holdings(&self.body, &self.holdings_field)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
