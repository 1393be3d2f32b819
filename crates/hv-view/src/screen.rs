//! One mount → teardown lifetime of the holdings screen.
//!
//! Mount issues exactly one fetch. The fetch task publishes its result only
//! while the session's token is live. Publishing checks the token under the
//! channel's write lock and teardown cancels under that same lock, so a
//! response arriving after teardown mutates nothing, even for receivers
//! obtained through [`HoldingsScreen::subscribe`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hv_md::{fetch_or_empty, FetchStatus, HoldingsSource};
use hv_portfolio::{aggregate, Aggregation};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// What the screen holds in memory after its fetch.
#[derive(Debug, Clone)]
pub struct ScreenData {
    pub aggregation: Aggregation,
    /// Diagnostic only; a failed fetch still renders as an empty list.
    pub status: FetchStatus,
    pub fetched_at_utc: DateTime<Utc>,
}

type Slot = watch::Sender<Option<ScreenData>>;

pub struct HoldingsScreen {
    cancel: CancellationToken,
    tx: Arc<Slot>,
    rx: watch::Receiver<Option<ScreenData>>,
    task: JoinHandle<()>,
}

impl HoldingsScreen {
    /// Start the screen's single fetch. Must be called inside a tokio runtime.
    pub fn mount(source: Arc<dyn HoldingsSource>) -> Self {
        let cancel = CancellationToken::new();
        let (tx, rx) = watch::channel(None);
        let tx = Arc::new(tx);

        let task_cancel = cancel.clone();
        let task_tx = Arc::clone(&tx);
        let task = tokio::spawn(async move {
            let outcome = fetch_or_empty(source.as_ref(), &task_cancel).await;
            if task_cancel.is_cancelled() {
                debug!("screen torn down; dropping fetch result");
                return;
            }

            let aggregation = aggregate(&outcome.records);
            if !aggregation.is_clean() {
                for s in &aggregation.skipped {
                    warn!(
                        index = s.index,
                        symbol = s.symbol.as_deref().unwrap_or("?"),
                        reason = %s.reason,
                        "skipping malformed holding"
                    );
                }
            }

            let data = ScreenData {
                aggregation,
                status: outcome.status,
                fetched_at_utc: outcome.completed_at_utc,
            };
            if !publish(&task_tx, &task_cancel, data) {
                debug!("screen torn down while aggregating; dropping fetch result");
            }
        });

        Self {
            cancel,
            tx,
            rx,
            task,
        }
    }

    /// Token tied to this session; cancelled on teardown.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().is_none()
    }

    /// Latest published data, if the fetch has finished.
    pub fn current(&self) -> Option<ScreenData> {
        self.rx.borrow().clone()
    }

    /// An independent view of the published data.
    pub fn subscribe(&self) -> watch::Receiver<Option<ScreenData>> {
        self.rx.clone()
    }

    /// Wait for the fetch to publish. `None` if the session token fired
    /// before anything was published.
    pub async fn wait_loaded(&self) -> Option<ScreenData> {
        let mut rx = self.rx.clone();
        tokio::select! {
            biased;
            loaded = rx.wait_for(Option::is_some) => loaded.ok()?.clone(),
            _ = self.cancel.cancelled() => None,
        }
    }

    pub fn teardown(self) {
        // Drop does the work.
    }
}

impl Drop for HoldingsScreen {
    fn drop(&mut self) {
        cancel_locked(&self.tx, &self.cancel);
        self.task.abort();
    }
}

/// Store `data` unless `cancel` has fired. Returns whether it was stored.
fn publish(tx: &Slot, cancel: &CancellationToken, data: ScreenData) -> bool {
    tx.send_if_modified(move |slot| {
        if cancel.is_cancelled() {
            return false;
        }
        *slot = Some(data);
        true
    })
}

/// Fire `cancel` while holding the channel's write lock.
fn cancel_locked(tx: &Slot, cancel: &CancellationToken) {
    tx.send_if_modified(|_| {
        cancel.cancel();
        false
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_portfolio::RawHolding;

    fn data() -> ScreenData {
        ScreenData {
            aggregation: aggregate(&[RawHolding::new(serde_json::json!({
                "symbol": "AAA", "ltp": 1, "quantity": 1, "avgPrice": 1, "close": 1
            }))]),
            status: FetchStatus::Loaded,
            fetched_at_utc: Utc::now(),
        }
    }

    #[test]
    fn publish_after_cancel_stores_nothing() {
        let (tx, rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        cancel_locked(&tx, &cancel);
        assert!(cancel.is_cancelled());

        assert!(!publish(&tx, &cancel, data()));
        assert!(rx.borrow().is_none());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn publish_while_live_notifies_receivers() {
        let (tx, rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        assert!(publish(&tx, &cancel, data()));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().as_ref().map(|d| d.aggregation.holdings.len()), Some(1));

        // A later teardown leaves the published value alone.
        cancel_locked(&tx, &cancel);
        assert!(rx.borrow().is_some());
    }
}
