//! Report output
//!
//! Units hand their final [`Report`] to a [`ReportSink`]. The console renderer
//! lives in [`text`], the JSON results file in [`json`].

pub mod json;
pub mod text;

use crate::error::StatsError;
use crate::stats::Report;

pub use text::TextSink;

/// Destination for finished reports
pub trait ReportSink {
    fn emit(&mut self, report: &Report) -> Result<(), StatsError>;
}

/// Collect reports in memory
impl ReportSink for Vec<Report> {
    fn emit(&mut self, report: &Report) -> Result<(), StatsError> {
        self.push(report.clone());
        Ok(())
    }
}

/// Forward every report to several sinks, in order
#[derive(Default)]
pub struct Fanout<'a> {
    sinks: Vec<&'a mut dyn ReportSink>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: &'a mut dyn ReportSink) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl ReportSink for Fanout<'_> {
    fn emit(&mut self, report: &Report) -> Result<(), StatsError> {
        for sink in self.sinks.iter_mut() {
            sink.emit(report)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fanout_forwards_to_all() {
        let mut first: Vec<Report> = Vec::new();
        let mut second: Vec<Report> = Vec::new();
        {
            let mut fanout = Fanout::new().with(&mut first).with(&mut second);
            fanout.emit(&Report::new("u", "h", json!(1))).unwrap();
            fanout.emit(&Report::new("v", "h", json!(2))).unwrap();
        }
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(first[1].unit, "v");
    }
}
