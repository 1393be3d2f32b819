//! hv-portfolio
//!
//! Holdings aggregation.
//! - Raw records are validated one by one; bad records are skipped and reported
//! - Per-item metrics: total value, P&L, profit flag
//! - Portfolio summary: total investment, current value, today's P&L, total P&L
//! - Pure deterministic logic (no IO, no time, no network)

mod aggregate;
mod metrics;
mod types;

pub use aggregate::{aggregate, Aggregation};
pub use metrics::{
    day_pnl, invested_value, item_metrics, items, market_value, summarize, unrealized_pnl,
};
pub use types::{
    Holding, ItemMetrics, PortfolioSummary, RawHolding, RecordError, SkippedRecord,
    FIELD_AVG_PRICE,
};
