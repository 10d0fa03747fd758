//! peoplestats CLI entry point

use anyhow::{Context, Result};
use peoplestats::config::{cli::Cli, toml as config_toml, validator, Config};
use peoplestats::output::json::{write_json_output, JsonRunOutput};
use peoplestats::output::{text, Fanout, ReportSink, TextSink};
use peoplestats::stats::units;
use peoplestats::{loader, AggregationEngine, Report};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);
    cli.validate()?;

    let config = config_toml::resolve(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;
    tracing::debug!(?config, "resolved configuration");

    if cli.dry_run {
        println!("{}", config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    run(&config)
}

/// Log to stderr; `RUST_LOG` wins over the `--debug` default
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the records, run every configured statistic, and write the outputs
fn run(config: &Config) -> Result<()> {
    let source = config
        .source
        .as_deref()
        .context("No source configured")?;

    // Loading finishes completely before the pass begins
    let timeout = Duration::from_secs(config.loader.timeout_secs);
    let records = loader::load(source, timeout)
        .with_context(|| format!("Failed to load people from {}", source))?;

    let engine = AggregationEngine::with_units(units::from_config(config))
        .context("Failed to register statistics")?;

    if !config.output.quiet {
        text::print_run_header(source, records.len(), &engine.unit_names());
    }

    let mut collected: Vec<Report> = Vec::new();
    let mut console = TextSink::stdout();
    let summary = {
        let mut sink = Fanout::new();
        if !config.output.quiet {
            sink = sink.with(&mut console as &mut dyn ReportSink);
        }
        sink = sink.with(&mut collected);
        engine.run(&records, &mut sink).context("Statistics run failed")?
    };

    if !config.output.quiet {
        text::print_run_footer(&summary);
    }

    if let Some(ref path) = config.output.json_output {
        let output = JsonRunOutput::new(source, &summary, collected);
        write_json_output(path, &output, config.output.pretty)?;
        if !config.output.quiet {
            println!("Results written to {}", path.display());
        }
    }

    Ok(())
}
