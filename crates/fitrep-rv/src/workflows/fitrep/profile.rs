use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::FitrepError;
use super::report::Report;
use super::unround::UnroundingLookup;

/// Half of the last displayed digit of a rounded profile average.
pub const AVERAGE_ROUNDING_SLACK: f64 = 0.005;

const MAX_SCORE: f64 = 7.0;

/// Reporting-senior history as transcribed from the official record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineProfile {
    #[serde(default)]
    pub rank: String,
    pub high: f64,
    pub low: f64,
    pub average: f64,
    pub count: i64,
}

impl BaselineProfile {
    pub fn new(rank: impl Into<String>, high: f64, low: f64, average: f64, count: i64) -> Self {
        Self {
            rank: rank.into(),
            high,
            low,
            average,
            count,
        }
    }

    /// A profile with no prior reports.
    pub fn empty(rank: impl Into<String>) -> Self {
        Self::new(rank, 0.0, 0.0, 0.0, 0)
    }

    pub fn validate(&self) -> Result<(), BaselineViolation> {
        if self.count < 0 {
            return Err(BaselineViolation::NegativeCount(self.count));
        }

        for (field, value) in [
            ("high", self.high),
            ("low", self.low),
            ("average", self.average),
        ] {
            if !(0.0..=MAX_SCORE).contains(&value) {
                return Err(BaselineViolation::OutOfRange { field, value });
            }
        }

        if self.count == 0 {
            if self.high > 0.0 || self.low > 0.0 || self.average > 0.0 {
                return Err(BaselineViolation::EmptyProfileNonZero);
            }
            return Ok(());
        }

        if self.low > self.high {
            return Err(BaselineViolation::LowAboveHigh);
        }
        if self.average > self.high {
            return Err(BaselineViolation::AverageAboveHigh);
        }
        if self.average < self.low {
            return Err(BaselineViolation::AverageBelowLow);
        }
        if self.count < 3 && self.average > 0.0 {
            return Err(BaselineViolation::SmallProfileAverage);
        }

        Ok(())
    }

    /// Recovers the exact high and low from their two-decimal record values.
    ///
    /// The average is left alone; its rounding slack is carried by the
    /// low/high average tracks of [`RankProfile`].
    pub fn unrounded(&self, lookup: &UnroundingLookup) -> Self {
        Self {
            high: lookup.unround(self.high),
            low: lookup.unround(self.low),
            ..self.clone()
        }
    }
}

/// Broken baseline rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BaselineViolation {
    #[error("report count cannot be negative (got {0})")]
    NegativeCount(i64),
    #[error("{field} must be between 0 and 7 (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("low cannot be greater than high")]
    LowAboveHigh,
    #[error("average cannot be greater than high")]
    AverageAboveHigh,
    #[error("average cannot be lower than low")]
    AverageBelowLow,
    #[error("average must be 0 with fewer than 3 reports")]
    SmallProfileAverage,
    #[error("high, low, and average must be 0 with no reports")]
    EmptyProfileNonZero,
}

/// Running high/low/average statistics for one rank.
///
/// `low == 0.0` doubles as "no low recorded yet", so a legitimately zero low
/// is replaced by the next folded report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankProfile {
    pub label: String,
    pub rank: String,
    pub high: f64,
    pub low: f64,
    pub average: f64,
    pub low_average: f64,
    pub high_average: f64,
    pub count: u64,
}

impl RankProfile {
    /// Validates the baseline and builds a profile from it.
    pub fn from_baseline(
        label: impl Into<String>,
        baseline: &BaselineProfile,
    ) -> Result<Self, FitrepError> {
        baseline.validate()?;
        Ok(Self::from_validated(label, baseline))
    }

    /// Builds a profile without re-checking the baseline rules.
    ///
    /// For baselines derived from an already validated one, such as the
    /// unrounded record values, which may legitimately sit a fraction past
    /// the transcribed average.
    pub fn from_validated(label: impl Into<String>, baseline: &BaselineProfile) -> Self {
        Self {
            label: label.into(),
            rank: baseline.rank.clone(),
            high: baseline.high,
            low: baseline.low,
            average: baseline.average,
            low_average: baseline.average - AVERAGE_ROUNDING_SLACK,
            high_average: baseline.average + AVERAGE_ROUNDING_SLACK,
            count: baseline.count.unsigned_abs(),
        }
    }

    /// Restores the statistics of `origin`, keeping this profile's label.
    pub fn reset_to(&mut self, origin: &RankProfile) {
        self.rank.clone_from(&origin.rank);
        self.high = origin.high;
        self.low = origin.low;
        self.average = origin.average;
        self.low_average = origin.average - AVERAGE_ROUNDING_SLACK;
        self.high_average = origin.average + AVERAGE_ROUNDING_SLACK;
        self.count = origin.count;
    }

    /// Folds one report into the running statistics.
    pub fn fold_report(&mut self, report: &Report) {
        self.fold_average(report.report_average());
    }

    pub(crate) fn fold_average(&mut self, report_average: f64) {
        if report_average > self.high {
            self.high = report_average;
        }
        if self.low == 0.0 || report_average < self.low {
            self.low = report_average;
        }

        self.count += 1;
        let n = self.count as f64;
        self.average += (report_average - self.average) / n;
        self.low_average += (report_average - self.low_average) / n;
        self.high_average += (report_average - self.high_average) / n;
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            label: self.label.clone(),
            rank: self.rank.clone(),
            high: self.high,
            low: self.low,
            average: self.average,
            count: self.count,
        }
    }
}

impl fmt::Display for RankProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} Profile - {} Reports",
            self.label, self.rank, self.count
        )?;
        writeln!(f, "     High: {:.2}", self.high)?;
        writeln!(f, "     Low:  {:.2}", self.low)?;
        write!(f, "     Avg:  {:.2}", self.average)
    }
}

/// Serializable copy of the headline profile statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub label: String,
    pub rank: String,
    pub high: f64,
    pub low: f64,
    pub average: f64,
    pub count: u64,
}
