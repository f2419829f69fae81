//! Fitness report relative values and reporting-senior profile replay.
//!
//! Letter grades are decoded into a [`Report`], reports are kept in
//! processing order by a [`ReportCollection`], and the
//! [`RecalculationEngine`] replays them against a baseline [`RankProfile`]
//! to produce process-time and cumulative RV bounds for every report.

mod collection;
pub mod domain;
pub mod engine;
pub mod intake;
mod profile;
mod report;
pub mod router;
mod session;
pub mod summary;
pub mod unround;

#[cfg(test)]
mod tests;

pub use collection::ReportCollection;
pub use domain::{decode, Category, FitrepError, ScoreLetter, CATEGORY_COUNT};
pub use engine::{compute_rv, recalculate, FinalStatistics, RecalculationEngine};
pub use intake::{validate_report_inputs, GradeSubmission, IntakeViolation};
pub use profile::{
    BaselineProfile, BaselineViolation, ProfileSnapshot, RankProfile, AVERAGE_ROUNDING_SLACK,
};
pub use report::{NarrativePayload, NarrativeView, Report, RvRange};
pub use router::{profile_router, RecalculationRequest};
pub use session::{Preview, ProfileSession};
pub use summary::{RecalculationView, ReportSummaryView, SessionSummary};
pub use unround::UnroundingLookup;
