//! Average age for one eye color
//!
//! Ages are summed as `u128` so that large `u64` ages cannot overflow the total.
//!
//! When nobody has the requested eye color the average is undefined: the
//! stored value is NaN, the report says so, and `data.average` is `null`.

use crate::error::StatsError;
use crate::record::Record;
use crate::stats::store::Namespace;
use crate::stats::{mean, Report, StatisticUnit};
use serde_json::json;

pub const NAME: &str = "average-age";

const SUM: &str = "average-age.sum";
const COUNT: &str = "average-age.count";
const AVERAGE: &str = "average-age.average";

/// Mean age of people whose eye color matches exactly
#[derive(Debug, Clone)]
pub struct AverageAgeByEyeColor {
    color: String,
}

impl AverageAgeByEyeColor {
    pub fn new(color: &str) -> Self {
        Self {
            color: color.to_string(),
        }
    }
}

impl StatisticUnit for AverageAgeByEyeColor {
    fn name(&self) -> &str {
        NAME
    }

    fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        ns.insert(SUM, 0u128)?;
        ns.insert(COUNT, 0u64)
    }

    fn accumulate(&self, record: &Record, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        if record.eye_color()? != self.color {
            return Ok(());
        }
        let age = record.age()?;
        *ns.get_mut::<u128>(SUM)? += u128::from(age);
        *ns.get_mut::<u64>(COUNT)? += 1;
        Ok(())
    }

    fn finalize(&self, ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
        let sum = *ns.get::<u128>(SUM)?;
        let count = *ns.get::<u64>(COUNT)?;
        let what = format!("average age of people with {} eyes", self.color);

        let report = match mean(sum as f64, count, &what) {
            Ok(average) => {
                ns.insert(AVERAGE, average)?;
                Report::new(
                    NAME,
                    format!("The average age of people with {} eyes is: {}", self.color, average),
                    json!({ "eye_color": self.color, "count": count, "average": average }),
                )
            }
            Err(StatsError::DivisionByZero { .. }) => {
                tracing::warn!(eye_color = %self.color, "no matching records, average is undefined");
                ns.insert(AVERAGE, f64::NAN)?;
                Report::new(
                    NAME,
                    format!(
                        "There are no people with {} eyes, so their average age is undefined",
                        self.color
                    ),
                    json!({ "eye_color": self.color, "count": 0, "average": null }),
                )
            }
            Err(e) => return Err(e),
        };
        Ok(report)
    }
}
