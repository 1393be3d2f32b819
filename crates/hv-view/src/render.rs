//! Text rendering of the holdings screen.
//!
//! Everything here is one-way: numbers become strings and nothing is parsed
//! back. Profit/loss markers come from the numeric flags.

use std::fmt::Write;

use hv_portfolio::{ItemMetrics, PortfolioSummary};

use crate::screen::ScreenData;
use crate::state::ViewState;

pub const PROFIT_MARKER: &str = "▲";
pub const LOSS_MARKER: &str = "▼";

/// Display-only settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_symbol: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Two decimals, no currency.
pub fn format_amount(value: f64) -> String {
    // Avoid printing "-0.00".
    let v = if value == 0.0 { 0.0 } else { value };
    format!("{v:.2}")
}

/// Two decimals with a currency prefix, e.g. `₹1100.00`, `₹-50.00`.
pub fn format_money(value: f64, currency_symbol: &str) -> String {
    format!("{currency_symbol}{}", format_amount(value))
}

fn marker(is_gain: bool) -> &'static str {
    if is_gain {
        PROFIT_MARKER
    } else {
        LOSS_MARKER
    }
}

/// One card per holding.
pub fn render_item(item: &ItemMetrics, opts: &DisplayOptions) -> String {
    let cur = opts.currency_symbol.as_str();
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:>14}", item.symbol, format_money(item.ltp, cur));
    let _ = writeln!(out, "  Qty: {}", item.quantity);
    let _ = writeln!(out, "  Total Value: {}", format_money(item.total_value, cur));
    let _ = writeln!(out, "  {} {}", marker(item.is_profit), format_amount(item.pnl));
    out
}

/// The collapsible summary block.
pub fn render_summary(summary: &PortfolioSummary, opts: &DisplayOptions) -> String {
    let cur = opts.currency_symbol.as_str();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18}{:>16}",
        "Current Value:",
        format_money(summary.current_value, cur)
    );
    let _ = writeln!(
        out,
        "{:<18}{:>16}",
        "Total Investment:",
        format_money(summary.total_investment, cur)
    );
    let _ = writeln!(
        out,
        "{:<18}{:>16} {}",
        "Today's P&L:",
        format_money(summary.todays_pnl, cur),
        marker(summary.is_day_gain())
    );
    out
}

/// Total P&L line; doubles as the expand/collapse affordance.
pub fn render_total_pnl(summary: &PortfolioSummary, opts: &DisplayOptions) -> String {
    format!(
        "Total P&L: {}",
        format_money(summary.total_pnl, &opts.currency_symbol)
    )
}

/// Whole screen. `data == None` or `state.loading` renders the loading view.
pub fn render_screen(
    data: Option<&ScreenData>,
    state: &ViewState,
    opts: &DisplayOptions,
) -> String {
    let data = match data {
        Some(d) if !state.loading => d,
        _ => return "Loading holdings...\n".to_string(),
    };

    let mut out = String::new();
    out.push_str("My Holdings\n");
    out.push_str("-----------\n");
    for item in data.aggregation.items() {
        out.push_str(&render_item(&item, opts));
    }
    if data.aggregation.holdings.is_empty() {
        out.push_str("No holdings.\n");
    }

    out.push('\n');
    if state.expanded {
        out.push_str(&render_summary(&data.aggregation.summary, opts));
    }
    out.push_str(&render_total_pnl(&data.aggregation.summary, opts));
    out.push('\n');
    let _ = writeln!(out, "as of {}", data.fetched_at_utc.format("%H:%M:%S UTC"));

    if !data.aggregation.is_clean() {
        let _ = writeln!(
            out,
            "({} record(s) skipped)",
            data.aggregation.skipped_count()
        );
    }
    out
}
