//! CLI argument parsing using clap

use crate::stats::units::StatKind;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// peoplestats - single-pass statistics over JSON person records
#[derive(Parser, Debug, Default)]
#[command(name = "peoplestats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// People JSON source: a file path or an http(s) URL
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// TOML configuration file (CLI flags take precedence)
    #[arg(short = 'c', long, env = "PEOPLESTATS_CONFIG")]
    pub config: Option<PathBuf>,

    // === Statistics ===
    /// Statistic to compute; repeat to select several (default: all, in standard order)
    #[arg(short = 's', long = "stat", value_enum)]
    pub stats: Vec<StatKind>,

    /// Number of surnames reported by top-surnames
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Eye color counted by eye-color-count
    #[arg(long)]
    pub count_eye_color: Option<String>,

    /// Eye color averaged by average-age
    #[arg(long)]
    pub average_eye_color: Option<String>,

    // === Landmark ===
    /// Landmark name used in the nearest-landmark report
    #[arg(long)]
    pub landmark_name: Option<String>,

    /// Landmark latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub landmark_lat: Option<f64>,

    /// Landmark longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub landmark_long: Option<f64>,

    // === Loading ===
    /// Timeout for remote sources, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    // === Output ===
    /// Write all reports to a JSON file
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Pretty-print the JSON output file
    #[arg(long)]
    pub pretty: bool,

    /// Do not print reports to the console
    #[arg(short = 'q', long)]
    pub quiet: bool,

    // === Runtime ===
    /// Validate and print configuration, then exit without loading data
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments from the process environment
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Checks that only depend on the flags themselves
    pub fn validate(&self) -> Result<()> {
        if self.landmark_lat.is_some() != self.landmark_long.is_some() {
            anyhow::bail!("--landmark-lat and --landmark-long must be given together");
        }
        if self.source.is_none() && self.config.is_none() {
            anyhow::bail!("no SOURCE given and no --config file to read one from");
        }
        Ok(())
    }
}
