//! Eye color counter

use crate::error::StatsError;
use crate::record::Record;
use crate::stats::store::Namespace;
use crate::stats::{Report, StatisticUnit};
use serde_json::json;

pub const NAME: &str = "eye-color-count";

const COUNT: &str = "eye-color-count.count";

/// Counts people whose eye color matches exactly
#[derive(Debug, Clone)]
pub struct EyeColorCounter {
    color: String,
}

impl EyeColorCounter {
    pub fn new(color: &str) -> Self {
        Self {
            color: color.to_string(),
        }
    }
}

impl StatisticUnit for EyeColorCounter {
    fn name(&self) -> &str {
        NAME
    }

    fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        ns.insert(COUNT, 0u64)
    }

    fn accumulate(&self, record: &Record, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        if record.eye_color()? == self.color {
            *ns.get_mut::<u64>(COUNT)? += 1;
        }
        Ok(())
    }

    fn finalize(&self, ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
        let count = *ns.get::<u64>(COUNT)?;
        Ok(Report::new(
            NAME,
            format!("The number of people with {} eyes: {}", self.color, count),
            json!({ "eye_color": self.color, "count": count }),
        ))
    }
}
