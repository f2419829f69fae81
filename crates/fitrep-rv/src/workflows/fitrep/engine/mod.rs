mod rv;

pub use rv::{
    compute_rv, RV_AT_AVERAGE, RV_FLOOR, RV_SPAN, SMALL_PROFILE_THRESHOLD, SPREAD_TOLERANCE,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::collection::ReportCollection;
use super::profile::RankProfile;
use super::report::RvRange;

/// Profile statistics after every report has been folded in; the reference
/// point for cumulative relative values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalStatistics {
    pub high: f64,
    pub low_average: f64,
    pub high_average: f64,
    pub count: u64,
}

impl FinalStatistics {
    /// Reads the reference statistics off a fully replayed profile.
    pub fn from_profile(profile: &RankProfile) -> Self {
        Self {
            high: profile.high,
            low_average: profile.low_average,
            high_average: profile.high_average,
            count: profile.count,
        }
    }

    /// Cumulative RV bounds of a report with the given average.
    pub fn rv_bounds(&self, report_average: f64) -> RvRange {
        RvRange::from_candidates(
            compute_rv(report_average, self.count, self.high, self.high_average),
            compute_rv(report_average, self.count, self.high, self.low_average),
        )
    }
}

/// Stateless two-pass replay of a report collection over a baseline profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecalculationEngine;

impl RecalculationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resets `working` to `origin`, replays every report in processing
    /// order, and fills in each report's process and cumulative RV bounds.
    ///
    /// A report is folded into the profile before its process RV is taken,
    /// so its own average is part of the profile it is measured against.
    pub fn recalculate(
        &self,
        origin: &RankProfile,
        working: &mut RankProfile,
        reports: &mut ReportCollection,
    ) -> FinalStatistics {
        working.reset_to(origin);

        for report in reports.iter_mut() {
            working.fold_report(report);
            let average = report.report_average();
            report.process_rv = RvRange::from_candidates(
                compute_rv(average, working.count, working.high, working.high_average),
                compute_rv(average, working.count, working.high, working.low_average),
            );
            debug!(
                name = %report.name,
                report_average = average,
                rv_process_min = report.process_rv.min,
                rv_process_max = report.process_rv.max,
                "replayed report"
            );
        }

        let finals = FinalStatistics::from_profile(working);
        for report in reports.iter_mut() {
            report.cumulative_rv = finals.rv_bounds(report.report_average());
        }

        debug!(
            reports = reports.len(),
            count = finals.count,
            high = finals.high,
            average = working.average,
            "profile recalculated"
        );

        finals
    }
}

/// Runs [`RecalculationEngine::recalculate`] with the default engine.
pub fn recalculate(
    origin: &RankProfile,
    working: &mut RankProfile,
    reports: &mut ReportCollection,
) -> FinalStatistics {
    RecalculationEngine::new().recalculate(origin, working, reports)
}
