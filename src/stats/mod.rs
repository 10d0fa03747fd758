//! Single-pass statistics
//!
//! Every statistic is a [`StatisticUnit`]: an independent reducer that sees each
//! record once, keeps its accumulators in its own namespace of the shared
//! [`ResultStore`](store::ResultStore), and produces a [`Report`] after the last
//! record. The [`AggregationEngine`](aggregator::AggregationEngine) drives one
//! traversal of the records and dispatches every record to every unit.
//!
//! # Example
//!
//! ```
//! use peoplestats::record::Record;
//! use peoplestats::stats::aggregator::AggregationEngine;
//! use peoplestats::stats::units::EyeColorCounter;
//! use peoplestats::stats::Report;
//! use serde_json::json;
//!
//! let people = json!([{"eyeColor": "green"}, {"eyeColor": "brown"}, {"eyeColor": "green"}]);
//! let records: Vec<Record> = people
//!     .as_array()
//!     .unwrap()
//!     .iter()
//!     .enumerate()
//!     .map(|(i, p)| Record::new(i, p.as_object().unwrap().clone()))
//!     .collect();
//!
//! let mut engine = AggregationEngine::new();
//! engine.register(Box::new(EyeColorCounter::new("green"))).unwrap();
//!
//! let mut reports: Vec<Report> = Vec::new();
//! let summary = engine.run(&records, &mut reports).unwrap();
//! assert_eq!(summary.visits, 3);
//! assert_eq!(reports[0].data["count"], 2);
//! ```

pub mod aggregator;
pub mod store;
pub mod units;

use crate::error::StatsError;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use store::Namespace;

/// Final output of one statistic unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the unit that produced the report
    pub unit: String,
    /// One-line human-readable summary
    pub headline: String,
    /// Additional console lines, printed under the headline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    /// Structured result for machine-readable output
    pub data: serde_json::Value,
}

impl Report {
    pub fn new(unit: impl Into<String>, headline: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            unit: unit.into(),
            headline: headline.into(),
            details: Vec::new(),
            data,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// An independent reducer computing one statistic during the shared pass
///
/// Implementors keep no state of their own between calls; everything they
/// accumulate lives in the [`Namespace`] handed to them, which makes a unit
/// reusable across runs.
///
/// The engine calls [`process`](StatisticUnit::process), which sequences the
/// three phases for each record:
///
/// 1. `init` on the first record (index 0)
/// 2. `accumulate` on every record, including the first
/// 3. `finalize` on the last record, after accumulating it
///
/// With a single record all three fire on the same call, in that order.
pub trait StatisticUnit {
    /// Unique name; also the owner of this unit's result keys
    fn name(&self) -> &str;

    /// Create this unit's result slots
    fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError>;

    /// Fold one record into the accumulators
    fn accumulate(&self, record: &Record, ns: &mut Namespace<'_>) -> Result<(), StatsError>;

    /// Derive final values from the accumulators and describe them
    fn finalize(&self, ns: &mut Namespace<'_>) -> Result<Report, StatsError>;

    /// Handle the record at `index` of `records`
    ///
    /// Returns the report when `index` is the last position, `None` otherwise.
    fn process(
        &self,
        record: &Record,
        index: usize,
        records: &[Record],
        ns: &mut Namespace<'_>,
    ) -> Result<Option<Report>, StatsError> {
        if index == 0 {
            self.init(ns)?;
        }

        self.accumulate(record, ns)?;

        if index + 1 == records.len() {
            return self.finalize(ns).map(Some);
        }
        Ok(None)
    }
}

/// Arithmetic mean of `count` values summing to `sum`
pub fn mean(sum: f64, count: u64, what: &str) -> Result<f64, StatsError> {
    if count == 0 {
        return Err(StatsError::DivisionByZero {
            what: what.to_string(),
        });
    }
    Ok(sum / count as f64)
}
