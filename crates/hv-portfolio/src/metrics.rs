use crate::types::{Holding, ItemMetrics, PortfolioSummary};

/// ltp * quantity
pub fn market_value(h: &Holding) -> f64 {
    h.ltp * h.quantity
}

/// avg_price * quantity
pub fn invested_value(h: &Holding) -> f64 {
    h.avg_price * h.quantity
}

/// (ltp - avg_price) * quantity
pub fn unrealized_pnl(h: &Holding) -> f64 {
    (h.ltp - h.avg_price) * h.quantity
}

/// (close - ltp) * quantity
///
/// NOTE: the conventional day-gain formula is (ltp - close) * quantity. The
/// reversed sign is what the holdings screen has always shown and is kept
/// until product confirms which one is intended.
pub fn day_pnl(h: &Holding) -> f64 {
    (h.close - h.ltp) * h.quantity
}

/// Derive the per-row values for one holding.
pub fn item_metrics(h: &Holding) -> ItemMetrics {
    let pnl = unrealized_pnl(h);
    ItemMetrics {
        symbol: h.symbol.clone(),
        ltp: h.ltp,
        quantity: h.quantity,
        total_value: market_value(h),
        pnl,
        is_profit: pnl >= 0.0,
    }
}

/// Lazily derive item metrics, preserving input order.
pub fn items(holdings: &[Holding]) -> impl Iterator<Item = ItemMetrics> + '_ {
    holdings.iter().map(item_metrics)
}

/// Sum the four summary fields in a single pass over `holdings`.
///
/// Empty input yields [`PortfolioSummary::ZERO`].
pub fn summarize(holdings: &[Holding]) -> PortfolioSummary {
    holdings
        .iter()
        .fold(PortfolioSummary::ZERO, |acc, h| PortfolioSummary {
            total_investment: acc.total_investment + invested_value(h),
            current_value: acc.current_value + market_value(h),
            todays_pnl: acc.todays_pnl + day_pnl(h),
            total_pnl: acc.total_pnl + unrealized_pnl(h),
        })
}
