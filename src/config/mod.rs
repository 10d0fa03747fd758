//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! Values are layered: built-in defaults, then the TOML file, then CLI flags.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::stats::units::nearest_landmark::EIFFEL_TOWER;
use crate::stats::units::top_surnames::DEFAULT_TOP_K;
use crate::stats::units::StatKind;
use crate::util::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File path or http(s) URL of the people JSON
    #[serde(default)]
    pub source: Option<String>,
    /// Statistics to compute, in dispatch order
    #[serde(default = "default_statistics")]
    pub statistics: Vec<StatKind>,
    #[serde(default)]
    pub landmark: LandmarkConfig,
    #[serde(default)]
    pub surnames: SurnameConfig,
    #[serde(default)]
    pub eye_colors: EyeColorConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            statistics: default_statistics(),
            landmark: LandmarkConfig::default(),
            surnames: SurnameConfig::default(),
            eye_colors: EyeColorConfig::default(),
            loader: LoaderConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_statistics() -> Vec<StatKind> {
    StatKind::ALL.to_vec()
}

/// Reference point for the nearest-landmark statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkConfig {
    #[serde(default = "default_landmark_name")]
    pub name: String,
    #[serde(default = "default_landmark_latitude")]
    pub latitude: f64,
    #[serde(default = "default_landmark_longitude")]
    pub longitude: f64,
}

impl LandmarkConfig {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            name: default_landmark_name(),
            latitude: default_landmark_latitude(),
            longitude: default_landmark_longitude(),
        }
    }
}

fn default_landmark_name() -> String {
    "Eiffel Tower".to_string()
}

fn default_landmark_latitude() -> f64 {
    EIFFEL_TOWER.latitude
}

fn default_landmark_longitude() -> f64 {
    EIFFEL_TOWER.longitude
}

/// Settings for the top-surnames statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurnameConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for SurnameConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Eye colors used by the counting and averaging statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeColorConfig {
    /// Color counted by eye-color-count
    #[serde(default = "default_counted_color")]
    pub counted: String,
    /// Color averaged by average-age
    #[serde(default = "default_averaged_color")]
    pub averaged: String,
}

impl Default for EyeColorConfig {
    fn default() -> Self {
        Self {
            counted: default_counted_color(),
            averaged: default_averaged_color(),
        }
    }
}

fn default_counted_color() -> String {
    "green".to_string()
}

fn default_averaged_color() -> String {
    "blue".to_string()
}

/// Data acquisition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Timeout for remote sources, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write all reports to this JSON file
    pub json_output: Option<PathBuf>,
    /// Pretty-print the JSON file
    #[serde(default)]
    pub pretty: bool,
    /// Suppress console reports
    #[serde(default)]
    pub quiet: bool,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Source: {}", self.source.as_deref().unwrap_or("<none>"))?;
        let names: Vec<&str> = self.statistics.iter().map(|k| k.name()).collect();
        writeln!(f, "  Statistics: {}", names.join(", "))?;
        writeln!(
            f,
            "  Landmark: {} ({}, {})",
            self.landmark.name, self.landmark.latitude, self.landmark.longitude
        )?;
        writeln!(f, "  Top surnames: {}", self.surnames.top_k)?;
        writeln!(
            f,
            "  Eye colors: count {}, average {}",
            self.eye_colors.counted, self.eye_colors.averaged
        )?;
        writeln!(f, "  Loader timeout: {}s", self.loader.timeout_secs)?;
        match self.output.json_output {
            Some(ref path) => write!(f, "  JSON output: {}", path.display()),
            None => write!(f, "  JSON output: <none>"),
        }
    }
}
