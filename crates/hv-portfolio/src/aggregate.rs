use std::collections::BTreeSet;

use crate::metrics::{items, summarize};
use crate::types::{
    Holding, ItemMetrics, PortfolioSummary, RawHolding, RecordError, SkippedRecord,
};

/// Result of aggregating one fetch result.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregation {
    /// Well-formed records, in input order.
    pub holdings: Vec<Holding>,
    pub summary: PortfolioSummary,
    /// Excluded records, in input order.
    pub skipped: Vec<SkippedRecord>,
}

impl Aggregation {
    /// Per-item metrics for the well-formed records, computed on demand.
    pub fn items(&self) -> impl Iterator<Item = ItemMetrics> + '_ {
        items(&self.holdings)
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True when no record was excluded.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Validate and aggregate raw records.
///
/// Never fails: malformed records, repeated symbols and records that would
/// overflow a total are excluded from both `holdings` and `summary` and
/// listed in `skipped`. The first record carrying a given symbol wins.
///
/// `summary` is always finite and equals `summarize(&holdings)`.
pub fn aggregate(raw: &[RawHolding]) -> Aggregation {
    let mut holdings = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut summary = PortfolioSummary::ZERO;

    for (index, record) in raw.iter().enumerate() {
        let validated = record.validate().and_then(|h| {
            if seen.contains(&h.symbol) {
                return Err(RecordError::DuplicateSymbol {
                    symbol: h.symbol.clone(),
                });
            }
            let next = summary.combine(&summarize(std::slice::from_ref(&h)));
            if next.is_finite() {
                Ok((h, next))
            } else {
                Err(RecordError::TotalOverflow)
            }
        });

        match validated {
            Ok((h, next)) => {
                seen.insert(h.symbol.clone());
                holdings.push(h);
                summary = next;
            }
            Err(reason) => skipped.push(SkippedRecord {
                index,
                symbol: record.symbol().map(str::to_string),
                reason,
            }),
        }
    }

    Aggregation {
        holdings,
        summary,
        skipped,
    }
}
