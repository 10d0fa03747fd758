//! peoplestats - single-pass statistics over JSON person records
//!
//! Loads an array of person objects, then computes any number of independent
//! statistics while visiting the records exactly once.
//!
//! # Architecture
//!
//! - **Loader**: reads a local file or downloads a URL before the pass starts
//! - **Aggregation engine**: one traversal, every record dispatched to every unit
//! - **Statistic units**: self-contained reducers with namespaced result slots
//! - **Reports**: console text and an optional JSON results file

pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod record;
pub mod stats;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use error::{LoadError, StatsError};
pub use record::Record;
pub use stats::aggregator::AggregationEngine;
pub use stats::{Report, StatisticUnit};

/// Result type used by the application layer
pub type Result<T> = anyhow::Result<T>;
