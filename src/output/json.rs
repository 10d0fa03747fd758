//! JSON output formatting
//!
//! Writes every report of a run into one document together with run metadata:
//!
//! ```json
//! {
//!   "generated_at": "2024-05-05T12:00:00+00:00",
//!   "source": "fakepeople.json",
//!   "record_count": 1000,
//!   "elapsed_ms": 3,
//!   "statistics": [ { "unit": "eye-color-count", "headline": "...", "data": { ... } } ]
//! }
//! ```

use crate::stats::aggregator::RunSummary;
use crate::stats::Report;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Complete JSON results document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRunOutput {
    pub generated_at: String,
    pub source: String,
    pub record_count: usize,
    pub elapsed_ms: u64,
    pub statistics: Vec<Report>,
}

impl JsonRunOutput {
    pub fn new(source: &str, summary: &RunSummary, reports: Vec<Report>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: source.to_string(),
            record_count: summary.records,
            elapsed_ms: summary.elapsed.as_millis() as u64,
            statistics: reports,
        }
    }
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, output: &JsonRunOutput, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, output)?;
    } else {
        serde_json::to_writer(&mut writer, output)?;
    }
    writer.flush()?;

    tracing::info!(path = %output_path.display(), "wrote JSON results");
    Ok(())
}
