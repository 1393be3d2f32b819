//! Fail-soft fetch boundary.
//!
//! Callers above this layer never see a [`FetchError`]: every failure,
//! cancellation included, becomes an empty record list plus a status that is
//! only meant for diagnostics.

use chrono::{DateTime, Utc};
use hv_portfolio::RawHolding;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::source::{FetchError, HoldingsSource};

/// How a fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Loaded,
    /// Any non-cancellation failure, rendered as text.
    Failed(String),
    Cancelled,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Loaded => "LOADED",
            FetchStatus::Failed(_) => "FAILED",
            FetchStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Records from one fetch attempt. `records` is empty unless `status` is
/// [`FetchStatus::Loaded`].
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub source: &'static str,
    pub records: Vec<RawHolding>,
    pub status: FetchStatus,
    pub completed_at_utc: DateTime<Utc>,
}

impl FetchOutcome {
    pub fn is_cancelled(&self) -> bool {
        self.status == FetchStatus::Cancelled
    }
}

/// Fetch once; on any failure return an empty list instead of an error.
pub async fn fetch_or_empty(
    source: &dyn HoldingsSource,
    cancel: &CancellationToken,
) -> FetchOutcome {
    let name = source.source_name();
    debug!(source = name, "fetching holdings");

    let (records, status) = match source.fetch_holdings(cancel).await {
        // A result that raced teardown is still discarded.
        Ok(_) if cancel.is_cancelled() => {
            info!(source = name, "fetch aborted");
            (Vec::new(), FetchStatus::Cancelled)
        }
        Ok(records) => {
            info!(source = name, count = records.len(), "holdings fetched");
            (records, FetchStatus::Loaded)
        }
        Err(FetchError::Cancelled) => {
            info!(source = name, "fetch aborted");
            (Vec::new(), FetchStatus::Cancelled)
        }
        Err(err) => {
            warn!(source = name, error = %err, "error fetching holdings");
            (Vec::new(), FetchStatus::Failed(err.to_string()))
        }
    };

    FetchOutcome {
        source: name,
        records,
        status,
        completed_at_utc: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticHoldingsSource;
    use serde_json::json;

    struct FailingSource(FetchError);

    #[async_trait::async_trait]
    impl HoldingsSource for FailingSource {
        fn source_name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_holdings(
            &self,
            _cancel: &CancellationToken,
        ) -> Result<Vec<RawHolding>, FetchError> {
            Err(self.0.clone())
        }
    }

    #[tokio::test]
    async fn failure_becomes_empty_list() {
        let source = FailingSource(FetchError::Status { code: 500 });
        let out = fetch_or_empty(&source, &CancellationToken::new()).await;
        assert!(out.records.is_empty());
        assert_eq!(
            out.status,
            FetchStatus::Failed("http error status=500".to_string())
        );
        assert_eq!(out.source, "failing");
    }

    #[tokio::test]
    async fn loaded_records_pass_through() {
        let source = StaticHoldingsSource::new(
            json!({"userHolding": [{"symbol": "AAA"}, {"symbol": "BBB"}]}),
            "userHolding",
        );
        let out = fetch_or_empty(&source, &CancellationToken::new()).await;
        assert_eq!(out.status, FetchStatus::Loaded);
        assert_eq!(out.records.len(), 2);
    }

    #[tokio::test]
    async fn cancelled_is_not_a_failure() {
        let source = FailingSource(FetchError::Cancelled);
        let out = fetch_or_empty(&source, &CancellationToken::new()).await;
        assert!(out.is_cancelled());
        assert_eq!(out.status.as_str(), "CANCELLED");
    }

    #[tokio::test]
    async fn success_after_cancel_is_discarded() {
        let source = StaticHoldingsSource::new(json!({"userHolding": [{}]}), "userHolding");
        // StaticHoldingsSource checks the token itself; use a source that does not.
        struct IgnoresToken(StaticHoldingsSource);

        #[async_trait::async_trait]
        impl HoldingsSource for IgnoresToken {
            fn source_name(&self) -> &'static str {
                "ignores-token"
            }

            async fn fetch_holdings(
                &self,
                _cancel: &CancellationToken,
            ) -> Result<Vec<RawHolding>, FetchError> {
                self.0.fetch_holdings(&CancellationToken::new()).await
            }
        }

        let cancel = CancellationToken::new();
        cancel.cancel();
        let out = fetch_or_empty(&IgnoresToken(source), &cancel).await;
        assert!(out.is_cancelled());
        assert!(out.records.is_empty());
    }
}
