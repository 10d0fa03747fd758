//! Most common surnames
//!
//! Builds a surname frequency table in first-seen order and, after the last
//! record, picks the K most frequent with [`select_top_k`]. The report lists
//! them in selection order, which is not necessarily sorted by count.

use crate::error::StatsError;
use crate::record::Record;
use crate::stats::store::Namespace;
use crate::stats::{Report, StatisticUnit};
use crate::util::top_k::select_top_k;
use indexmap::IndexMap;
use serde_json::json;

pub const NAME: &str = "top-surnames";

const COUNTS: &str = "top-surnames.counts";
const SELECTED: &str = "top-surnames.selected";

pub const DEFAULT_TOP_K: usize = 10;

/// Reports the `k` most common last names with their counts
#[derive(Debug, Clone)]
pub struct TopSurnames {
    k: usize,
}

impl TopSurnames {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl Default for TopSurnames {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl StatisticUnit for TopSurnames {
    fn name(&self) -> &str {
        NAME
    }

    fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        ns.insert(COUNTS, IndexMap::<String, u64>::new())
    }

    fn accumulate(&self, record: &Record, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        let surname = record.last_name()?;
        let counts = ns.get_mut::<IndexMap<String, u64>>(COUNTS)?;
        match counts.get_mut(surname) {
            Some(n) => *n += 1,
            None => {
                counts.insert(surname.to_string(), 1);
            }
        }
        Ok(())
    }

    fn finalize(&self, ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
        let counts = ns.get::<IndexMap<String, u64>>(COUNTS)?;
        let selected: Vec<(String, u64)> = select_top_k(self.k, counts)
            .into_iter()
            .map(|surname| {
                let n = counts[&surname];
                (surname, n)
            })
            .collect();

        let details = selected
            .iter()
            .map(|(surname, n)| format!("{} - {}", surname, n))
            .collect();
        let data = json!({
            "k": self.k,
            "distinct_surnames": counts.len(),
            "surnames": selected
                .iter()
                .map(|(surname, n)| json!({ "surname": surname, "count": n }))
                .collect::<Vec<_>>(),
        });

        ns.insert(SELECTED, selected)?;

        Ok(Report::new(
            NAME,
            format!("The top {} most common surnames with their totals are:", self.k),
            data,
        )
        .with_details(details))
    }
}
