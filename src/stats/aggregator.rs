//! Single-pass aggregation engine
//!
//! The engine owns an ordered list of [`StatisticUnit`]s and walks the record
//! sequence exactly once. For each record it calls every unit in registration
//! order, handing each one a [`Namespace`](super::store::Namespace) of a fresh
//! [`ResultStore`]. Reports produced at the last record are forwarded to a
//! [`ReportSink`].
//!
//! # Usage
//!
//! 1. Create the engine with `new()`
//! 2. Register units with `register()`
//! 3. Call `run()` with a fully loaded record slice and a sink
//! 4. Inspect the returned [`RunSummary`] (store, visit count, timing)
//!
//! Running twice over the same records yields identical reports, since all
//! accumulator state lives in the per-run store.

use super::store::ResultStore;
use super::StatisticUnit;
use crate::error::StatsError;
use crate::output::ReportSink;
use crate::record::Record;
use std::time::{Duration, Instant};

/// Drives one traversal of the records through every registered unit
#[derive(Default)]
pub struct AggregationEngine {
    units: Vec<Box<dyn StatisticUnit>>,
}

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunSummary {
    /// Every unit's accumulators and final values
    pub store: ResultStore,
    /// Number of records traversed
    pub records: usize,
    /// Total unit invocations (records × units)
    pub visits: usize,
    /// Wall-clock time of the pass
    pub elapsed: Duration,
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from an ordered list of units
    pub fn with_units(units: Vec<Box<dyn StatisticUnit>>) -> Result<Self, StatsError> {
        let mut engine = Self::new();
        for unit in units {
            engine.register(unit)?;
        }
        Ok(engine)
    }

    /// Append a unit; names must be unique since they own result keys
    pub fn register(&mut self, unit: Box<dyn StatisticUnit>) -> Result<(), StatsError> {
        if self.units.iter().any(|u| u.name() == unit.name()) {
            return Err(StatsError::DuplicateUnit(unit.name().to_string()));
        }
        tracing::debug!(unit = unit.name(), position = self.units.len(), "registered statistic unit");
        self.units.push(unit);
        Ok(())
    }

    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    /// Unit names in dispatch order
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name()).collect()
    }

    /// Run every unit over `records` in a single pass
    ///
    /// # Errors
    ///
    /// - [`StatsError::EmptyInput`] if `records` is empty; no unit is called
    /// - any error a unit returns (e.g. [`StatsError::RecordShape`]) aborts the run
    /// - [`StatsError::MissingReport`] if a unit never produced its report
    pub fn run(&self, records: &[Record], sink: &mut dyn ReportSink) -> Result<RunSummary, StatsError> {
        if records.is_empty() {
            return Err(StatsError::EmptyInput);
        }

        tracing::info!(records = records.len(), units = self.units.len(), "starting aggregation pass");

        let start = Instant::now();
        let mut store = ResultStore::new();
        let mut reported = vec![0usize; self.units.len()];
        let mut visits = 0usize;

        for (index, record) in records.iter().enumerate() {
            for (slot, unit) in self.units.iter().enumerate() {
                tracing::trace!(index, unit = unit.name(), "dispatch");
                let mut ns = store.namespace(unit.name());
                let report = unit.process(record, index, records, &mut ns)?;
                visits += 1;

                if let Some(report) = report {
                    tracing::debug!(unit = unit.name(), "unit finalized");
                    reported[slot] += 1;
                    sink.emit(&report)?;
                }
            }
        }

        if let Some(slot) = reported.iter().position(|&n| n != 1) {
            return Err(StatsError::MissingReport {
                unit: self.units[slot].name().to_string(),
            });
        }

        let elapsed = start.elapsed();
        tracing::info!(visits, elapsed_ms = elapsed.as_millis() as u64, "aggregation pass complete");

        Ok(RunSummary {
            store,
            records: records.len(),
            visits,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::records;
    use crate::stats::store::Namespace;
    use crate::stats::units::{EyeColorCounter, StatKind};
    use crate::stats::Report;
    use serde_json::json;

    /// Logs every phase call and every visited position
    struct PhaseLog {
        name: &'static str,
    }

    impl PhaseLog {
        fn key(&self, suffix: &str) -> String {
            format!("{}.{}", self.name, suffix)
        }
    }

    impl StatisticUnit for PhaseLog {
        fn name(&self) -> &str {
            self.name
        }

        fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
            ns.insert(&self.key("phases"), vec!["init".to_string()])?;
            ns.insert(&self.key("visited"), Vec::<usize>::new())
        }

        fn accumulate(&self, record: &Record, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
            ns.get_mut::<Vec<String>>(&self.key("phases"))?.push("accumulate".to_string());
            ns.get_mut::<Vec<usize>>(&self.key("visited"))?.push(record.position());
            Ok(())
        }

        fn finalize(&self, ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
            ns.get_mut::<Vec<String>>(&self.key("phases"))?.push("finalize".to_string());
            let visited = ns.get::<Vec<usize>>(&self.key("visited"))?.clone();
            Ok(Report::new(self.name, "done", json!(visited)))
        }
    }

    /// Never reports because it overrides `process`
    struct Silent;

    impl StatisticUnit for Silent {
        fn name(&self) -> &str {
            "silent"
        }
        fn init(&self, _ns: &mut Namespace<'_>) -> Result<(), StatsError> {
            Ok(())
        }
        fn accumulate(&self, _record: &Record, _ns: &mut Namespace<'_>) -> Result<(), StatsError> {
            Ok(())
        }
        fn finalize(&self, _ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
            Ok(Report::new("silent", "", json!(null)))
        }
        fn process(
            &self,
            _record: &Record,
            _index: usize,
            _records: &[Record],
            _ns: &mut Namespace<'_>,
        ) -> Result<Option<Report>, StatsError> {
            Ok(None)
        }
    }

    /// Tries to write a key another unit already owns
    struct Squatter;

    impl StatisticUnit for Squatter {
        fn name(&self) -> &str {
            "squatter"
        }
        fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
            ns.insert("log.phases", Vec::<String>::new())
        }
        fn accumulate(&self, _record: &Record, _ns: &mut Namespace<'_>) -> Result<(), StatsError> {
            Ok(())
        }
        fn finalize(&self, _ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
            Ok(Report::new("squatter", "", json!(null)))
        }
    }

    fn people(n: usize) -> Vec<Record> {
        let items: Vec<_> = (0..n)
            .map(|i| {
                let color = if i % 2 == 0 { "green" } else { "blue" };
                json!({ "eyeColor": color })
            })
            .collect();
        records(json!(items))
    }

    #[test]
    fn test_every_unit_sees_every_record_in_order() {
        let engine = AggregationEngine::with_units(vec![
            Box::new(PhaseLog { name: "first" }),
            Box::new(PhaseLog { name: "second" }),
        ])
        .unwrap();
        let input = people(5);
        let mut reports: Vec<Report> = Vec::new();
        let summary = engine.run(&input, &mut reports).unwrap();

        assert_eq!(summary.records, 5);
        assert_eq!(summary.visits, 10);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].unit, "first");
        assert_eq!(reports[1].unit, "second");
        for report in &reports {
            assert_eq!(report.data, json!([0, 1, 2, 3, 4]));
        }
        assert_eq!(summary.store.owner("first.visited"), Some("first"));
        assert_eq!(summary.store.owner("second.visited"), Some("second"));
    }

    #[test]
    fn test_single_record_runs_all_phases_in_order() {
        let engine = AggregationEngine::with_units(vec![Box::new(PhaseLog { name: "log" })]).unwrap();
        let input = people(1);
        let mut reports: Vec<Report> = Vec::new();
        let summary = engine.run(&input, &mut reports).unwrap();

        assert_eq!(reports.len(), 1);
        let phases = summary.store.get::<Vec<String>>("log.phases").unwrap();
        assert_eq!(phases, &vec!["init", "accumulate", "finalize"]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let engine = AggregationEngine::with_units(vec![Box::new(PhaseLog { name: "log" })]).unwrap();
        let mut reports: Vec<Report> = Vec::new();
        assert!(matches!(engine.run(&[], &mut reports), Err(StatsError::EmptyInput)));
        assert!(reports.is_empty());
    }

    #[test]
    fn test_duplicate_unit_names_rejected() {
        let mut engine = AggregationEngine::new();
        engine.register(Box::new(PhaseLog { name: "dup" })).unwrap();
        let err = engine.register(Box::new(PhaseLog { name: "dup" })).unwrap_err();
        assert!(matches!(err, StatsError::DuplicateUnit(ref name) if name == "dup"));
        assert_eq!(engine.num_units(), 1);
    }

    #[test]
    fn test_missing_report_detected() {
        let engine = AggregationEngine::with_units(vec![Box::new(Silent)]).unwrap();
        let mut reports: Vec<Report> = Vec::new();
        let err = engine.run(&people(3), &mut reports).unwrap_err();
        assert!(matches!(err, StatsError::MissingReport { ref unit } if unit == "silent"));
    }

    #[test]
    fn test_key_collision_between_units() {
        let engine = AggregationEngine::with_units(vec![
            Box::new(PhaseLog { name: "log" }),
            Box::new(Squatter),
        ])
        .unwrap();
        let mut reports: Vec<Report> = Vec::new();
        let err = engine.run(&people(2), &mut reports).unwrap_err();
        assert!(matches!(err, StatsError::KeyCollision { ref owner, .. } if owner == "log"));
    }

    #[test]
    fn test_record_shape_error_aborts_run() {
        let engine = AggregationEngine::with_units(vec![Box::new(EyeColorCounter::new("green"))]).unwrap();
        let input = records(json!([{"eyeColor": "green"}, {"age": 3}, {"eyeColor": "blue"}]));
        let mut reports: Vec<Report> = Vec::new();
        let err = engine.run(&input, &mut reports).unwrap_err();
        assert!(matches!(err, StatsError::RecordShape { index: 1, field: "eyeColor", .. }));
        assert!(reports.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let engine = AggregationEngine::with_units(
            StatKind::ALL.iter().map(|kind| kind.build_default()).collect(),
        )
        .unwrap();
        let input = crate::stats::units::tests::sample_people();

        let mut first: Vec<Report> = Vec::new();
        let mut second: Vec<Report> = Vec::new();
        engine.run(&input, &mut first).unwrap();
        engine.run(&input, &mut second).unwrap();
        assert_eq!(first.len(), StatKind::ALL.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unit_names_in_registration_order() {
        let engine = AggregationEngine::with_units(vec![
            Box::new(PhaseLog { name: "b" }),
            Box::new(PhaseLog { name: "a" }),
        ])
        .unwrap();
        assert_eq!(engine.unit_names(), vec!["b", "a"]);
    }
}
