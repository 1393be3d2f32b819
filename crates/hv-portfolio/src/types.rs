use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire key for the average acquisition price.
pub const FIELD_AVG_PRICE: &str = "avgPrice";

/// A validated holding record.
///
/// All numeric fields are plain `f64`. Prices are >= 0; quantity may be
/// fractional or negative (short positions flow through unchanged).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    /// Last traded price.
    pub ltp: f64,
    pub quantity: f64,
    pub avg_price: f64,
    /// Previous close price.
    pub close: f64,
}

impl Holding {
    pub fn new<S: Into<String>>(
        symbol: S,
        ltp: f64,
        quantity: f64,
        avg_price: f64,
        close: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            ltp,
            quantity,
            avg_price,
            close,
        }
    }
}

/// A holding record exactly as received from a data source.
///
/// The adapter does not validate records; malformed entries survive until
/// [`crate::aggregate`] excludes and reports them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawHolding(Value);

impl RawHolding {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The record's symbol, if it carries a non-empty string one.
    pub fn symbol(&self) -> Option<&str> {
        self.0
            .get("symbol")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Check field presence, types and sign constraints, and that every
    /// price times quantity stays finite.
    pub fn validate(&self) -> Result<Holding, RecordError> {
        let obj = self.0.as_object().ok_or(RecordError::NotAnObject)?;

        let symbol = match obj.get("symbol") {
            None | Some(Value::Null) => {
                return Err(RecordError::MissingField { field: "symbol" })
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(RecordError::EmptySymbol)
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(RecordError::NotAString {
                    field: "symbol",
                    raw: other.to_string(),
                })
            }
        };

        let ltp = number_field(obj, "ltp")?;
        let quantity = number_field(obj, "quantity")?;
        let avg_price = number_field(obj, FIELD_AVG_PRICE)?;
        let close = number_field(obj, "close")?;

        for (field, value) in [("ltp", ltp), (FIELD_AVG_PRICE, avg_price), ("close", close)] {
            if value < 0.0 {
                return Err(RecordError::NegativePrice { field, value });
            }
            if !(value * quantity).is_finite() {
                return Err(RecordError::NonFinite { field });
            }
        }

        Ok(Holding {
            symbol,
            ltp,
            quantity,
            avg_price,
            close,
        })
    }
}

impl From<&Holding> for RawHolding {
    fn from(h: &Holding) -> Self {
        RawHolding(serde_json::json!({
            "symbol": h.symbol,
            "ltp": h.ltp,
            "quantity": h.quantity,
            "avgPrice": h.avg_price,
            "close": h.close,
        }))
    }
}

fn number_field(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<f64, RecordError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(RecordError::MissingField { field }),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RecordError::NotANumber {
                field,
                raw: n.to_string(),
            }),
        // No implicit coercion: "110" is not a number.
        Some(other) => Err(RecordError::NotANumber {
            field,
            raw: other.to_string(),
        }),
    }
}

/// Why a record was excluded from aggregation.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordError {
    /// The record is not a JSON object.
    NotAnObject,
    /// A required field is absent or null.
    MissingField { field: &'static str },
    /// The symbol is present but blank.
    EmptySymbol,
    /// A string field holds a non-string value.
    NotAString { field: &'static str, raw: String },
    /// A numeric field holds a non-number value.
    NotANumber { field: &'static str, raw: String },
    /// A price field is below zero.
    NegativePrice { field: &'static str, value: f64 },
    /// `field` times quantity overflows f64.
    NonFinite { field: &'static str },
    /// Adding the record would push a portfolio total past f64 range.
    TotalOverflow,
    /// The symbol already appeared earlier in the same input.
    DuplicateSymbol { symbol: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotAnObject => write!(f, "record is not an object"),
            RecordError::MissingField { field } => write!(f, "field '{field}' is missing"),
            RecordError::EmptySymbol => write!(f, "field 'symbol' is empty"),
            RecordError::NotAString { field, raw } => {
                write!(f, "field '{field}' is not a string: {raw}")
            }
            RecordError::NotANumber { field, raw } => {
                write!(f, "field '{field}' is not a number: {raw}")
            }
            RecordError::NegativePrice { field, value } => {
                write!(f, "field '{field}' must be >= 0, got {value}")
            }
            RecordError::NonFinite { field } => {
                write!(f, "field '{field}' times quantity is not finite")
            }
            RecordError::TotalOverflow => write!(f, "record overflows the portfolio totals"),
            RecordError::DuplicateSymbol { symbol } => {
                write!(f, "duplicate symbol '{symbol}'")
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Per-holding derived values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemMetrics {
    pub symbol: String,
    pub ltp: f64,
    pub quantity: f64,
    /// ltp * quantity
    pub total_value: f64,
    /// (ltp - avg_price) * quantity
    pub pnl: f64,
    /// pnl >= 0; zero counts as non-loss.
    pub is_profit: bool,
}

/// The four portfolio-level aggregates.
///
/// Values are never rounded here; formatting belongs to the display layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_investment: f64,
    pub current_value: f64,
    pub todays_pnl: f64,
    pub total_pnl: f64,
}

impl PortfolioSummary {
    pub const ZERO: PortfolioSummary = PortfolioSummary {
        total_investment: 0.0,
        current_value: 0.0,
        todays_pnl: 0.0,
        total_pnl: 0.0,
    };

    /// Field-wise sum, for re-aggregating summaries of disjoint record sets.
    pub fn combine(&self, other: &PortfolioSummary) -> PortfolioSummary {
        PortfolioSummary {
            total_investment: self.total_investment + other.total_investment,
            current_value: self.current_value + other.current_value,
            todays_pnl: self.todays_pnl + other.todays_pnl,
            total_pnl: self.total_pnl + other.total_pnl,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.total_investment.is_finite()
            && self.current_value.is_finite()
            && self.todays_pnl.is_finite()
            && self.total_pnl.is_finite()
    }

    pub fn is_day_gain(&self) -> bool {
        self.todays_pnl >= 0.0
    }

    pub fn is_total_gain(&self) -> bool {
        self.total_pnl >= 0.0
    }
}

/// A record that [`crate::aggregate`] excluded.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRecord {
    /// Position in the input sequence.
    pub index: usize,
    pub symbol: Option<String>,
    pub reason: RecordError,
}
