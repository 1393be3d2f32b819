//! Scenario: malformed records are excluded from items and sums, and reported.

use hv_portfolio::{aggregate, summarize, Holding, RawHolding, RecordError};
use serde_json::json;

#[test]
fn malformed_records_do_not_affect_summary() {
    let raw = vec![
        RawHolding::new(json!({
            "symbol": "AAA", "ltp": 110, "quantity": 10, "avgPrice": 100, "close": 105
        })),
        RawHolding::new(json!({
            "symbol": "BAD1", "ltp": "n/a", "quantity": 10, "avgPrice": 100, "close": 105
        })),
        RawHolding::new(json!({"symbol": "BAD2", "ltp": 5, "avgPrice": 4, "close": 5})),
        RawHolding::new(json!({
            "symbol": "BBB", "ltp": 20.5, "quantity": 4, "avgPrice": 25, "close": 21
        })),
        RawHolding::new(json!(null)),
    ];

    let agg = aggregate(&raw);

    let expected = summarize(&[
        Holding::new("AAA", 110.0, 10.0, 100.0, 105.0),
        Holding::new("BBB", 20.5, 4.0, 25.0, 21.0),
    ]);
    assert_eq!(agg.summary, expected);

    let symbols: Vec<String> = agg.items().map(|m| m.symbol).collect();
    assert_eq!(symbols, vec!["AAA", "BBB"]);

    assert_eq!(agg.skipped_count(), 3);
    let indices: Vec<usize> = agg.skipped.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![1, 2, 4]);
    assert!(matches!(
        agg.skipped[0].reason,
        RecordError::NotANumber { field: "ltp", .. }
    ));
    assert_eq!(
        agg.skipped[1].reason,
        RecordError::MissingField { field: "quantity" }
    );
    assert_eq!(agg.skipped[1].symbol.as_deref(), Some("BAD2"));
    assert_eq!(agg.skipped[2].reason, RecordError::NotAnObject);
}

#[test]
fn overflowing_product_is_excluded() {
    let raw = vec![
        RawHolding::new(json!({
            "symbol": "HUGE", "ltp": 1e308, "quantity": 10, "avgPrice": 1e308, "close": 1
        })),
        RawHolding::new(json!({
            "symbol": "AAA", "ltp": 110, "quantity": 10, "avgPrice": 100, "close": 105
        })),
    ];

    let agg = aggregate(&raw);

    assert!(!agg.is_clean());
    assert_eq!(agg.skipped[0].index, 0);
    assert_eq!(agg.skipped[0].reason, RecordError::NonFinite { field: "ltp" });
    assert!(agg.summary.is_finite());
    assert_eq!(agg.summary.current_value, 1100.0);
    assert_eq!(
        agg.summary.total_pnl,
        agg.summary.current_value - agg.summary.total_investment
    );
}

#[test]
fn fully_malformed_input_is_zero_not_error() {
    let raw = vec![
        RawHolding::new(json!({"symbol": 7})),
        RawHolding::new(json!("AAA")),
    ];
    let agg = aggregate(&raw);
    assert!(agg.holdings.is_empty());
    assert_eq!(agg.skipped_count(), 2);
    assert_eq!(agg.summary.current_value, 0.0);
    assert_eq!(agg.summary.total_investment, 0.0);
}

#[test]
fn record_error_display_is_readable() {
    let err = RecordError::NotANumber {
        field: "ltp",
        raw: "\"n/a\"".to_string(),
    };
    assert_eq!(err.to_string(), "field 'ltp' is not a number: \"n/a\"");
    assert_eq!(
        RecordError::MissingField { field: "close" }.to_string(),
        "field 'close' is missing"
    );
}
