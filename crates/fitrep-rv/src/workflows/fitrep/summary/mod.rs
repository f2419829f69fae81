mod session;
pub mod views;

pub use session::SessionSummary;
pub use views::{RecalculationView, ReportSummaryView};
