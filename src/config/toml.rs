//! TOML configuration file parsing
//!
//! ```toml
//! source = "fakepeople.json"
//! statistics = ["eye-color-count", "top-surnames", "pay-gap"]
//!
//! [landmark]
//! name = "Eiffel Tower"
//! latitude = 48.8584
//! longitude = 2.2945
//!
//! [surnames]
//! top_k = 10
//!
//! [eye_colors]
//! counted = "green"
//! averaged = "blue"
//!
//! [output]
//! json_output = "stats.json"
//! pretty = true
//! ```

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Config {
    if let Some(ref source) = cli.source {
        config.source = Some(source.clone());
    }

    // Override statistics selection
    if !cli.stats.is_empty() {
        config.statistics = cli.stats.clone();
    }
    if let Some(top_k) = cli.top_k {
        config.surnames.top_k = top_k;
    }
    if let Some(ref color) = cli.count_eye_color {
        config.eye_colors.counted = color.clone();
    }
    if let Some(ref color) = cli.average_eye_color {
        config.eye_colors.averaged = color.clone();
    }

    // Override landmark
    if let Some(ref name) = cli.landmark_name {
        config.landmark.name = name.clone();
    }
    if let Some(lat) = cli.landmark_lat {
        config.landmark.latitude = lat;
    }
    if let Some(long) = cli.landmark_long {
        config.landmark.longitude = long;
    }

    if let Some(timeout) = cli.timeout {
        config.loader.timeout_secs = timeout;
    }

    // Override output settings
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.pretty {
        config.output.pretty = true;
    }
    if cli.quiet {
        config.output.quiet = true;
    }

    config
}

/// Build the effective configuration: defaults, then the config file, then CLI flags
pub fn resolve(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    Ok(merge_cli_with_config(cli, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::units::StatKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_file() {
        let config = parse_toml_string(
            r#"
            source = "https://example.com/people.json"
            statistics = ["pay-gap", "eye-color-count"]

            [landmark]
            name = "Big Ben"
            latitude = 51.5007
            longitude = -0.1246

            [surnames]
            top_k = 3

            [eye_colors]
            counted = "brown"

            [loader]
            timeout_secs = 5

            [output]
            json_output = "out.json"
            pretty = true
            "#,
        )
        .unwrap();

        assert_eq!(config.source.as_deref(), Some("https://example.com/people.json"));
        assert_eq!(config.statistics, vec![StatKind::PayGap, StatKind::EyeColorCount]);
        assert_eq!(config.landmark.name, "Big Ben");
        assert_eq!(config.landmark.longitude, -0.1246);
        assert_eq!(config.surnames.top_k, 3);
        assert_eq!(config.eye_colors.counted, "brown");
        assert_eq!(config.eye_colors.averaged, "blue");
        assert_eq!(config.loader.timeout_secs, 5);
        assert!(config.output.pretty);
        assert!(!config.output.quiet);
    }

    #[test]
    fn test_unknown_statistic_rejected() {
        assert!(parse_toml_string(r#"statistics = ["median-income"]"#).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = parse_toml_string(
            r#"
            source = "file.json"
            [surnames]
            top_k = 3
            "#,
        )
        .unwrap();
        let cli = Cli {
            source: Some("cli.json".to_string()),
            top_k: Some(7),
            stats: vec![StatKind::TopSurnames],
            quiet: true,
            ..Cli::default()
        };

        let merged = merge_cli_with_config(&cli, config);
        assert_eq!(merged.source.as_deref(), Some("cli.json"));
        assert_eq!(merged.surnames.top_k, 7);
        assert_eq!(merged.statistics, vec![StatKind::TopSurnames]);
        assert!(merged.output.quiet);
        assert_eq!(merged.landmark, LandmarkConfig::default());
    }

    #[test]
    fn test_resolve_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "source = \"from-file.json\"").unwrap();
        writeln!(file, "[eye_colors]").unwrap();
        writeln!(file, "averaged = \"hazel\"").unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };
        let config = resolve(&cli).unwrap();
        assert_eq!(config.source.as_deref(), Some("from-file.json"));
        assert_eq!(config.eye_colors.averaged, "hazel");
    }

    #[test]
    fn test_resolve_missing_file_fails() {
        let cli = Cli {
            config: Some("/nonexistent/peoplestats.toml".into()),
            ..Cli::default()
        };
        assert!(resolve(&cli).is_err());
    }
}
