//! Error types
//!
//! Two failure channels are kept apart: [`LoadError`] covers acquiring and
//! parsing the source data before any statistic runs, and [`StatsError`]
//! covers everything that can go wrong during the single pass itself.

use std::path::PathBuf;

/// Failure while fetching or parsing the people payload
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start the HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse JSON from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array of people in {origin}")]
    NotAnArray { origin: String },

    #[error("element {index} of {origin} is not a JSON object")]
    NotAnObject { origin: String, index: usize },
}

/// Failure during an aggregation run
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("no records to aggregate")]
    EmptyInput,

    #[error("record {index}: field `{field}` is missing or not {expected}")]
    RecordShape {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("division by zero computing {what}")]
    DivisionByZero { what: String },

    #[error("result key `{key}` is owned by unit `{owner}`, not `{requested_by}`")]
    KeyCollision {
        key: String,
        owner: String,
        requested_by: String,
    },

    #[error("unit `{unit}` has no result slot `{key}`")]
    MissingSlot { unit: String, key: String },

    #[error("result slot `{key}` of unit `{unit}` holds a different type")]
    SlotType { unit: String, key: String },

    #[error("a unit named `{0}` is already registered")]
    DuplicateUnit(String),

    #[error("unit `{unit}` finished the pass without reporting")]
    MissingReport { unit: String },

    #[error("failed to emit report: {0}")]
    Sink(#[from] std::io::Error),
}
