use serde::Serialize;

use super::super::collection::ReportCollection;
use super::super::engine::FinalStatistics;
use super::super::profile::{ProfileSnapshot, RankProfile};
use super::super::report::{Report, RvRange};

/// Per-report figures surfaced to display and export layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummaryView {
    pub rank: String,
    pub name: String,
    pub report_average: f64,
    pub rv_process: RvRange,
    pub rv_cumulative: RvRange,
    pub scores: String,
}

impl ReportSummaryView {
    pub fn from_report(report: &Report) -> Self {
        Self {
            rank: report.rank.clone(),
            name: report.name.clone(),
            report_average: report.report_average(),
            rv_process: report.process_rv(),
            rv_cumulative: report.cumulative_rv(),
            scores: report.letter_block(),
        }
    }
}

/// Full outcome of one replay: both profiles and every report in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecalculationView {
    pub origin: ProfileSnapshot,
    pub working: ProfileSnapshot,
    pub finals: FinalStatistics,
    pub reports: Vec<ReportSummaryView>,
}

impl RecalculationView {
    pub fn from_parts(
        origin: &RankProfile,
        working: &RankProfile,
        finals: FinalStatistics,
        reports: &ReportCollection,
    ) -> Self {
        Self {
            origin: origin.snapshot(),
            working: working.snapshot(),
            finals,
            reports: reports.iter().map(ReportSummaryView::from_report).collect(),
        }
    }
}
