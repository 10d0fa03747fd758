//! Configuration validation

use super::*;
use anyhow::Result;
use std::collections::HashSet;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_source(config.source.as_deref())?;
    validate_statistics(&config.statistics)?;
    validate_landmark(&config.landmark)?;
    validate_surnames(&config.surnames)?;
    validate_eye_colors(&config.eye_colors)?;
    validate_loader(&config.loader)?;
    Ok(())
}

fn validate_source(source: Option<&str>) -> Result<()> {
    match source {
        None => anyhow::bail!("no source given: pass SOURCE or set `source` in the config file"),
        Some(s) if s.trim().is_empty() => anyhow::bail!("source must not be empty"),
        Some(_) => Ok(()),
    }
}

/// Validate the statistics selection
pub fn validate_statistics(statistics: &[StatKind]) -> Result<()> {
    if statistics.is_empty() {
        anyhow::bail!("at least one statistic must be selected");
    }

    let mut seen = HashSet::new();
    for kind in statistics {
        if !seen.insert(kind) {
            anyhow::bail!("statistic `{}` is selected more than once", kind);
        }
    }
    Ok(())
}

/// Validate landmark coordinate
pub fn validate_landmark(landmark: &LandmarkConfig) -> Result<()> {
    if !(-90.0..=90.0).contains(&landmark.latitude) {
        anyhow::bail!("landmark latitude must be between -90 and 90, got {}", landmark.latitude);
    }
    if !(-180.0..=180.0).contains(&landmark.longitude) {
        anyhow::bail!("landmark longitude must be between -180 and 180, got {}", landmark.longitude);
    }
    if landmark.name.trim().is_empty() {
        anyhow::bail!("landmark name must not be empty");
    }
    Ok(())
}

fn validate_surnames(surnames: &SurnameConfig) -> Result<()> {
    if surnames.top_k == 0 {
        anyhow::bail!("top_k must be at least 1");
    }
    Ok(())
}

fn validate_eye_colors(colors: &EyeColorConfig) -> Result<()> {
    if colors.counted.trim().is_empty() {
        anyhow::bail!("counted eye color must not be empty");
    }
    if colors.averaged.trim().is_empty() {
        anyhow::bail!("averaged eye color must not be empty");
    }
    Ok(())
}

fn validate_loader(loader: &LoaderConfig) -> Result<()> {
    if loader.timeout_secs == 0 {
        anyhow::bail!("loader timeout must be at least 1 second");
    }
    Ok(())
}
