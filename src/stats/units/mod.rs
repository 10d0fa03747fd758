//! Built-in statistic units
//!
//! - **eye-color-count**: how many people have a given eye color
//! - **top-surnames**: the K most common surnames with their counts
//! - **nearest-landmark**: the person living closest to a landmark
//! - **average-age**: mean age of people with a given eye color
//! - **pay-gap**: the company whose average balance differs most between eye colors
//!
//! Each unit stores its accumulators under keys prefixed with its own name.

pub mod average_age;
pub mod eye_colors;
pub mod nearest_landmark;
pub mod pay_gap;
pub mod top_surnames;

pub use average_age::AverageAgeByEyeColor;
pub use eye_colors::EyeColorCounter;
pub use nearest_landmark::NearestToLandmark;
pub use pay_gap::PayGapByEyeColor;
pub use top_surnames::TopSurnames;

use super::StatisticUnit;
use crate::config::Config;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selectable statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StatKind {
    /// Count people with the configured eye color
    EyeColorCount,
    /// Most common surnames
    TopSurnames,
    /// Person closest to the configured landmark
    NearestLandmark,
    /// Average age for the configured eye color
    AverageAge,
    /// Company with the largest pay spread between eye colors
    PayGap,
}

impl StatKind {
    /// Every statistic, in default registration order
    pub const ALL: [StatKind; 5] = [
        StatKind::EyeColorCount,
        StatKind::TopSurnames,
        StatKind::NearestLandmark,
        StatKind::AverageAge,
        StatKind::PayGap,
    ];

    /// Unit name, which is also the prefix of its result keys
    pub fn name(&self) -> &'static str {
        match self {
            StatKind::EyeColorCount => eye_colors::NAME,
            StatKind::TopSurnames => top_surnames::NAME,
            StatKind::NearestLandmark => nearest_landmark::NAME,
            StatKind::AverageAge => average_age::NAME,
            StatKind::PayGap => pay_gap::NAME,
        }
    }

    /// Instantiate the unit with settings from `config`
    pub fn build(&self, config: &Config) -> Box<dyn StatisticUnit> {
        match self {
            StatKind::EyeColorCount => Box::new(EyeColorCounter::new(&config.eye_colors.counted)),
            StatKind::TopSurnames => Box::new(TopSurnames::new(config.surnames.top_k)),
            StatKind::NearestLandmark => Box::new(NearestToLandmark::new(
                &config.landmark.name,
                config.landmark.coordinate(),
            )),
            StatKind::AverageAge => Box::new(AverageAgeByEyeColor::new(&config.eye_colors.averaged)),
            StatKind::PayGap => Box::new(PayGapByEyeColor::new()),
        }
    }

    /// Instantiate the unit with default settings
    pub fn build_default(&self) -> Box<dyn StatisticUnit> {
        self.build(&Config::default())
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Units for every configured statistic, in configured order
pub fn from_config(config: &Config) -> Vec<Box<dyn StatisticUnit>> {
    config.statistics.iter().map(|kind| kind.build(config)).collect()
}
