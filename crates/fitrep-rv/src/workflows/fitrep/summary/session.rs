use chrono::NaiveDate;
use std::fmt;

use super::super::collection::ReportCollection;
use super::super::profile::RankProfile;
use super::super::report::Report;

const RULE: &str = "--------------------------------------------------";
const BANNER: &str = "====================================";

/// Plain-text session summary: both profiles followed by every report in
/// processing order.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub origin: RankProfile,
    pub working: RankProfile,
    pub reports: Vec<Report>,
    pub generated_on: Option<NaiveDate>,
}

impl SessionSummary {
    pub fn from_parts(
        origin: &RankProfile,
        working: &RankProfile,
        reports: &ReportCollection,
    ) -> Self {
        Self {
            origin: origin.clone(),
            working: working.clone(),
            reports: reports.iter().cloned().collect(),
            generated_on: None,
        }
    }

    pub fn dated(mut self, generated_on: NaiveDate) -> Self {
        self.generated_on = Some(generated_on);
        self
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "Session Summary")?;
        writeln!(f, "{BANNER}")?;
        if let Some(date) = self.generated_on {
            writeln!(f, "Generated: {}", date.format("%Y-%m-%d"))?;
        }
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Profile Info:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "{}", self.origin)?;
        writeln!(f, "{}", self.working)?;
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Reports Completed:")?;
        write!(f, "{RULE}")?;

        if self.reports.is_empty() {
            write!(f, "\nNo reports added to profile yet.")?;
        }
        for report in &self.reports {
            write!(f, "\n{report}\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fitrep::domain::{Category, ScoreLetter};
    use crate::workflows::fitrep::engine::recalculate;
    use crate::workflows::fitrep::profile::BaselineProfile;

    #[test]
    fn renders_profiles_and_reports_in_order() {
        let origin = RankProfile::from_baseline(
            "Original",
            &BaselineProfile::new("Capt", 4.5, 2.5, 3.5, 8),
        )
        .expect("valid");
        let mut working = origin.clone();
        working.label = "Active".to_string();
        let mut reports: ReportCollection = ["ADAMS", "BAKER"]
            .into_iter()
            .map(|name| {
                Report::with_letters(
                    "Capt",
                    name,
                    Category::ordered().map(|category| (category, ScoreLetter::D)),
                )
            })
            .collect();
        recalculate(&origin, &mut working, &mut reports);

        let summary = SessionSummary::from_parts(&origin, &working, &reports)
            .dated(NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"));
        let text = summary.to_string();

        assert!(text.contains("Generated: 2025-03-01"));
        assert!(text.contains("Original Capt Profile - 8 Reports"));
        assert!(text.contains("Active Capt Profile - 10 Reports"));
        assert!(text.contains("Scores:    DD DDD DDDDD DDD D"));
        let adams = text.find("Capt ADAMS").expect("adams listed");
        let baker = text.find("Capt BAKER").expect("baker listed");
        assert!(adams < baker);
    }

    #[test]
    fn notes_empty_sessions() {
        let origin =
            RankProfile::from_baseline("Original", &BaselineProfile::empty("Sgt")).expect("valid");
        let summary = SessionSummary::from_parts(&origin, &origin, &ReportCollection::new());
        assert!(summary
            .to_string()
            .ends_with("No reports added to profile yet."));
    }
}
