//! `hv summarize`: aggregate a saved response body without the network.

use std::fs;

use anyhow::{Context, Result};
use hv_md::{HoldingsSource, StaticHoldingsSource};
use hv_portfolio::{aggregate, Aggregation, ItemMetrics};
use hv_view::format_amount;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

pub async fn summarize(file: String, field: String, as_json: bool) -> Result<()> {
    let raw = fs::read_to_string(&file).with_context(|| format!("read --file failed: {}", file))?;
    let source = StaticHoldingsSource::from_json_str(&raw, field)
        .with_context(|| format!("--file is not valid JSON: {}", file))?;
    let records = source
        .fetch_holdings(&CancellationToken::new())
        .await
        .with_context(|| format!("--file has no holdings list: {}", file))?;

    let agg = aggregate(&records);

    if as_json {
        let out = serde_json::to_string_pretty(&aggregation_json(&agg))
            .context("serialize summary json failed")?;
        println!("{out}");
    } else {
        print_key_values(&agg);
    }
    Ok(())
}

fn aggregation_json(agg: &Aggregation) -> Value {
    let items: Vec<ItemMetrics> = agg.items().collect();
    let skipped: Vec<Value> = agg
        .skipped
        .iter()
        .map(|s| {
            json!({
                "index": s.index,
                "symbol": s.symbol,
                "reason": s.reason.to_string(),
            })
        })
        .collect();

    json!({
        "summary": agg.summary,
        "items": items,
        "skipped": skipped,
    })
}

fn print_key_values(agg: &Aggregation) {
    println!(
        "holdings={} skipped={}",
        agg.holdings.len(),
        agg.skipped_count()
    );
    println!("total_investment={}", format_amount(agg.summary.total_investment));
    println!("current_value={}", format_amount(agg.summary.current_value));
    println!("todays_pnl={}", format_amount(agg.summary.todays_pnl));
    println!("total_pnl={}", format_amount(agg.summary.total_pnl));
    for item in agg.items() {
        println!(
            "item symbol={} total_value={} pnl={} is_profit={}",
            item.symbol,
            format_amount(item.total_value),
            format_amount(item.pnl),
            item.is_profit
        );
    }
    for s in &agg.skipped {
        println!(
            "skipped index={} symbol={} reason={}",
            s.index,
            s.symbol.as_deref().unwrap_or("-"),
            s.reason
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_portfolio::RawHolding;

    #[test]
    fn json_shape_has_three_sections() {
        let agg = aggregate(&[
            RawHolding::new(json!({
                "symbol": "AAA", "ltp": 110, "quantity": 10, "avgPrice": 100, "close": 105
            })),
            RawHolding::new(json!({"symbol": "BAD"})),
        ]);
        let v = aggregation_json(&agg);
        assert_eq!(v["summary"]["current_value"], json!(1100.0));
        assert_eq!(v["items"][0]["symbol"], json!("AAA"));
        assert_eq!(v["items"][0]["is_profit"], json!(true));
        assert_eq!(v["skipped"][0]["symbol"], json!("BAD"));
        assert_eq!(v["skipped"][0]["reason"], json!("field 'ltp' is missing"));
    }
}
