//! Pay gap between eye colors
//!
//! Accumulates balance sums and counts per (company, eye color). After the last
//! record it averages each eye color within each company, takes the spread
//! between the best and worst paid color, and reports the company with the
//! largest spread. Companies and colors are visited in first-seen order and
//! every comparison is strict, so ties go to whichever was seen first.

use crate::error::StatsError;
use crate::output::text::format_amount;
use crate::record::Record;
use crate::stats::store::Namespace;
use crate::stats::{mean, Report, StatisticUnit};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;

pub const NAME: &str = "pay-gap";

const TABLE: &str = "pay-gap.table";
const WIDEST: &str = "pay-gap.widest";

/// Running balance total for one eye color in one company
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PayAccumulator {
    pub sum: f64,
    pub count: u64,
}

/// company → eye color → accumulator, both in first-seen order
pub type PayTable = IndexMap<String, IndexMap<String, PayAccumulator>>;

/// Widest pay spread found in one company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayGap {
    pub company: String,
    pub advantaged: String,
    pub disadvantaged: String,
    pub spread: f64,
}

/// Finds the company with the largest average-balance spread between eye colors
#[derive(Debug, Clone, Default)]
pub struct PayGapByEyeColor;

impl PayGapByEyeColor {
    pub fn new() -> Self {
        Self
    }
}

/// Spread between the highest and lowest average balance within one company
fn company_gap(company: &str, colors: &IndexMap<String, PayAccumulator>) -> Result<Option<PayGap>, StatsError> {
    let mut max: Option<(&str, f64)> = None;
    let mut min: Option<(&str, f64)> = None;

    for (color, acc) in colors {
        let average = mean(acc.sum, acc.count, &format!("average balance of {} eyes at {}", color, company))?;
        if max.map_or(true, |(_, best)| average > best) {
            max = Some((color.as_str(), average));
        }
        if min.map_or(true, |(_, worst)| average < worst) {
            min = Some((color.as_str(), average));
        }
    }

    Ok(match (max, min) {
        (Some((advantaged, high)), Some((disadvantaged, low))) => Some(PayGap {
            company: company.to_string(),
            advantaged: advantaged.to_string(),
            disadvantaged: disadvantaged.to_string(),
            spread: high - low,
        }),
        _ => None,
    })
}

/// Company with the strictly largest spread, first seen on ties
pub fn widest_gap(table: &PayTable) -> Result<Option<PayGap>, StatsError> {
    let mut widest: Option<PayGap> = None;
    for (company, colors) in table {
        if let Some(gap) = company_gap(company, colors)? {
            if widest.as_ref().map_or(true, |w| gap.spread > w.spread) {
                widest = Some(gap);
            }
        }
    }
    Ok(widest)
}

impl StatisticUnit for PayGapByEyeColor {
    fn name(&self) -> &str {
        NAME
    }

    fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        ns.insert(TABLE, PayTable::new())
    }

    fn accumulate(&self, record: &Record, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        let company = record.company()?;
        let color = record.eye_color()?;
        let balance = record.balance()?;

        let table = ns.get_mut::<PayTable>(TABLE)?;
        let acc = table
            .entry(company.to_string())
            .or_default()
            .entry(color.to_string())
            .or_default();
        acc.sum += balance;
        acc.count += 1;
        Ok(())
    }

    fn finalize(&self, ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
        let table = ns.get::<PayTable>(TABLE)?;
        let companies = table.len();
        let widest = widest_gap(table)?.ok_or_else(|| StatsError::MissingSlot {
            unit: NAME.to_string(),
            key: WIDEST.to_string(),
        })?;

        let headline = format!(
            "The company with the biggest discrimination on eye colour is {} with it giving {} eyed people {} more than {} eyed people on average!",
            widest.company,
            widest.advantaged,
            format_amount(widest.spread),
            widest.disadvantaged
        );
        let data = json!({
            "companies": companies,
            "company": widest.company,
            "advantaged_eye_color": widest.advantaged,
            "disadvantaged_eye_color": widest.disadvantaged,
            "spread": widest.spread,
        });

        ns.insert(WIDEST, widest)?;
        Ok(Report::new(NAME, headline, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::records;
    use crate::stats::aggregator::AggregationEngine;

    fn employee(company: &str, eye: &str, balance: &str) -> serde_json::Value {
        json!({ "company": company, "eyeColor": eye, "balance": balance })
    }

    fn run(people: serde_json::Value) -> (Report, PayGap) {
        let engine = AggregationEngine::with_units(vec![Box::new(PayGapByEyeColor::new())]).unwrap();
        let mut reports: Vec<Report> = Vec::new();
        let summary = engine.run(&records(people), &mut reports).unwrap();
        let gap = summary.store.get::<PayGap>(WIDEST).unwrap().clone();
        (reports.remove(0), gap)
    }

    #[test]
    fn test_picks_largest_spread_not_largest_average() {
        // RICH pays everyone a lot but evenly; SKEW has the wider spread
        let (report, gap) = run(json!([
            employee("RICH", "blue", "$10,000.00"),
            employee("RICH", "brown", "$9,900.00"),
            employee("SKEW", "blue", "$500.00"),
            employee("SKEW", "green", "$2,500.00"),
            employee("SKEW", "green", "$1,500.00"),
        ]));
        assert_eq!(gap.company, "SKEW");
        assert_eq!(gap.advantaged, "green");
        assert_eq!(gap.disadvantaged, "blue");
        assert!((gap.spread - 1500.0).abs() < 1e-9);
        assert_eq!(report.data["company"], "SKEW");
        assert!(report.headline.contains("giving green eyed people 1,500.00 more than blue eyed people"));
    }

    #[test]
    fn test_company_with_single_color_has_no_spread() {
        let (_, gap) = run(json!([
            employee("MONO", "blue", "100"),
            employee("MONO", "blue", "300"),
        ]));
        assert_eq!(gap.company, "MONO");
        assert_eq!(gap.spread, 0.0);
        assert_eq!(gap.advantaged, "blue");
        assert_eq!(gap.disadvantaged, "blue");
    }

    #[test]
    fn test_equal_spreads_keep_first_company() {
        let (_, gap) = run(json!([
            employee("FIRST", "blue", "100"),
            employee("FIRST", "brown", "200"),
            employee("SECOND", "blue", "300"),
            employee("SECOND", "brown", "400"),
        ]));
        assert_eq!(gap.company, "FIRST");
    }

    #[test]
    fn test_equal_averages_keep_first_color() {
        let mut table = PayTable::new();
        let colors = table.entry("CO".to_string()).or_default();
        colors.insert("blue".into(), PayAccumulator { sum: 200.0, count: 2 });
        colors.insert("green".into(), PayAccumulator { sum: 100.0, count: 1 });
        colors.insert("brown".into(), PayAccumulator { sum: 50.0, count: 1 });
        colors.insert("grey".into(), PayAccumulator { sum: 50.0, count: 1 });

        let gap = widest_gap(&table).unwrap().unwrap();
        assert_eq!(gap.advantaged, "blue");
        assert_eq!(gap.disadvantaged, "brown");
        assert_eq!(gap.spread, 50.0);
    }

    #[test]
    fn test_averages_use_counts() {
        let (_, gap) = run(json!([
            employee("CO", "blue", "1,000"),
            employee("CO", "blue", "3,000"),
            employee("CO", "brown", "1,500"),
        ]));
        // blue averages 2,000 against brown's 1,500
        assert_eq!(gap.advantaged, "blue");
        assert!((gap.spread - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_balance_is_shape_error() {
        let engine = AggregationEngine::with_units(vec![Box::new(PayGapByEyeColor::new())]).unwrap();
        let input = records(json!([employee("CO", "blue", "n/a")]));
        let mut reports: Vec<Report> = Vec::new();
        let err = engine.run(&input, &mut reports).unwrap_err();
        assert!(matches!(err, StatsError::RecordShape { field: "balance", .. }));
    }
}
