//! Human-readable text output

use super::ReportSink;
use crate::error::StatsError;
use crate::stats::aggregator::RunSummary;
use crate::stats::Report;
use std::io::{self, Write};

/// Console renderer: headline, detail lines, then a blank line
pub struct TextSink<W: Write> {
    out: W,
}

impl TextSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn emit(&mut self, report: &Report) -> Result<(), StatsError> {
        writeln!(self.out, "{}", report.headline)?;
        for line in &report.details {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Print the banner shown before the pass starts
pub fn print_run_header(source: &str, record_count: usize, units: &[&str]) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    PEOPLE STATISTICS");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Source:     {}", source);
    println!("Records:    {}", format_number(record_count as u64));
    println!("Statistics: {}", units.join(", "));
    println!();
    println!("Now computing all stats...");
    println!();
}

/// Print the closing line after every unit has reported
pub fn print_run_footer(summary: &RunSummary) {
    println!(
        "All stats computed: {} records, {} visits in {:.3}s",
        format_number(summary.records as u64),
        format_number(summary.visits as u64),
        summary.elapsed.as_secs_f64()
    );
}

/// Format a count with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;

    for c in s.chars().rev() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
        count += 1;
    }

    result.chars().rev().collect()
}

/// Format a monetary amount with two decimals and thousands separators
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, format_number(rounded / 100), rounded % 100)
}
