use tracing::{debug, info};

use super::collection::ReportCollection;
use super::domain::FitrepError;
use super::engine::{FinalStatistics, RecalculationEngine};
use super::intake::{validate_report_inputs, GradeSubmission};
use super::profile::{BaselineProfile, RankProfile};
use super::report::{NarrativeView, Report};
use super::summary::{RecalculationView, SessionSummary};
use super::unround::UnroundingLookup;

/// Result of replaying a speculative edit on private copies of the session.
#[derive(Debug, Clone)]
pub struct Preview {
    pub report: Report,
    pub profile: RankProfile,
    pub reports: ReportCollection,
    pub finals: FinalStatistics,
}

/// One reporting senior's working session.
///
/// The origin profile is fixed at creation. Every mutation replays the whole
/// collection against it into the working profile. Previews run on deep
/// copies and only become canonical through [`ProfileSession::commit`].
#[derive(Debug, Clone)]
pub struct ProfileSession {
    origin: RankProfile,
    working: RankProfile,
    reports: ReportCollection,
    engine: RecalculationEngine,
}

impl ProfileSession {
    /// Validates `baseline` and opens a session on it. With `unround` set,
    /// the transcribed high and low are then expanded back to exact averages.
    pub fn new(baseline: BaselineProfile, unround: bool) -> Result<Self, FitrepError> {
        // Rules apply to the values as entered; unrounding may nudge high
        // or low a fraction past the transcribed average.
        baseline.validate()?;
        let baseline = if unround {
            baseline.unrounded(&UnroundingLookup::new())
        } else {
            baseline
        };

        let origin = RankProfile::from_validated("Original", &baseline);
        let mut working = origin.clone();
        working.label = "Active".to_string();

        Ok(Self {
            origin,
            working,
            reports: ReportCollection::new(),
            engine: RecalculationEngine::new(),
        })
    }

    pub fn origin(&self) -> &RankProfile {
        &self.origin
    }

    pub fn working(&self) -> &RankProfile {
        &self.working
    }

    pub fn reports(&self) -> &ReportCollection {
        &self.reports
    }

    pub fn report(&self, name: &str) -> Result<&Report, FitrepError> {
        self.reports
            .get(name)
            .ok_or_else(|| FitrepError::UnknownReport {
                name: name.to_string(),
            })
    }

    /// Shows what the session would look like with this report added or
    /// re-graded, without changing the session.
    pub fn preview<I, K, V>(&self, name: &str, grades: I) -> Result<Preview, FitrepError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let grades = validate_report_inputs(name, grades)?;
        let name = name.trim();
        let mut report = Report::with_letters(self.origin.rank.clone(), name, grades);

        let mut reports = self.reports.clone();
        if let Some(existing) = reports.get(name) {
            report.narrative = existing.narrative.clone();
        }
        reports.insert(report);

        let mut profile = self.working.clone();
        let finals = self
            .engine
            .recalculate(&self.origin, &mut profile, &mut reports);

        let report = reports
            .get(name)
            .cloned()
            .ok_or_else(|| FitrepError::UnknownReport {
                name: name.to_string(),
            })?;

        debug!(
            name,
            rv_cumulative_min = report.rv_cumulative_min(),
            rv_cumulative_max = report.rv_cumulative_max(),
            "previewed report"
        );

        Ok(Preview {
            report,
            profile,
            reports,
            finals,
        })
    }

    /// Makes a preview the canonical state.
    pub fn commit(&mut self, preview: Preview) -> Report {
        let Preview {
            report,
            profile,
            reports,
            ..
        } = preview;
        self.working = profile;
        self.reports = reports;

        info!(
            name = %report.name,
            reports = self.reports.len(),
            count = self.working.count,
            "report committed to profile"
        );
        report
    }

    /// Adds or re-grades a report and commits the result.
    pub fn submit<I, K, V>(&mut self, name: &str, grades: I) -> Result<Report, FitrepError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let preview = self.preview(name, grades)?;
        Ok(self.commit(preview))
    }

    /// Validates and adds submissions in order, replaying once at the end.
    ///
    /// Nothing is committed if any submission is rejected.
    pub fn submit_batch<'a, I>(&mut self, submissions: I) -> Result<FinalStatistics, FitrepError>
    where
        I: IntoIterator<Item = &'a GradeSubmission>,
    {
        let mut reports = self.reports.clone();
        for submission in submissions {
            let grades = validate_report_inputs(&submission.name, &submission.grades)?;
            let rank = submission
                .rank
                .clone()
                .unwrap_or_else(|| self.origin.rank.clone());
            let mut report = Report::with_letters(rank, submission.name.trim(), grades);
            if let Some(existing) = reports.get(&report.name) {
                report.narrative = existing.narrative.clone();
            }
            reports.insert(report);
        }

        let mut profile = self.working.clone();
        let finals = self
            .engine
            .recalculate(&self.origin, &mut profile, &mut reports);
        self.working = profile;
        self.reports = reports;

        info!(
            reports = self.reports.len(),
            count = self.working.count,
            "report batch committed to profile"
        );
        Ok(finals)
    }

    /// Drops a report and replays the remainder.
    pub fn remove(&mut self, name: &str) -> Result<Report, FitrepError> {
        let removed = self
            .reports
            .remove(name)
            .ok_or_else(|| FitrepError::UnknownReport {
                name: name.to_string(),
            })?;
        self.recalculate();
        info!(name, reports = self.reports.len(), "report removed from profile");
        Ok(removed)
    }

    /// Replays the canonical collection against the origin profile.
    pub fn recalculate(&mut self) -> FinalStatistics {
        self.engine
            .recalculate(&self.origin, &mut self.working, &mut self.reports)
    }

    pub fn set_narrative_inputs(
        &mut self,
        name: &str,
        billet: impl Into<String>,
        accomplishments: impl Into<String>,
        context: impl Into<String>,
    ) -> Result<(), FitrepError> {
        let report = self.report_mut(name)?;
        report.narrative.billet = billet.into();
        report.narrative.accomplishments = accomplishments.into();
        report.narrative.context = context.into();
        Ok(())
    }

    pub fn record_section_i(
        &mut self,
        name: &str,
        text: impl Into<String>,
    ) -> Result<(), FitrepError> {
        self.report_mut(name)?.narrative.section_i = text.into();
        Ok(())
    }

    /// Counts one more narrative draft for `name` and returns the new total.
    pub fn increment_generation_counter(&mut self, name: &str) -> Result<u32, FitrepError> {
        let narrative = &mut self.report_mut(name)?.narrative;
        narrative.generations += 1;
        Ok(narrative.generations)
    }

    pub fn narrative_views(&self) -> Vec<NarrativeView> {
        self.reports.iter().map(Report::narrative_view).collect()
    }

    pub fn view(&self) -> RecalculationView {
        RecalculationView::from_parts(
            &self.origin,
            &self.working,
            FinalStatistics::from_profile(&self.working),
            &self.reports,
        )
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_parts(&self.origin, &self.working, &self.reports)
    }

    fn report_mut(&mut self, name: &str) -> Result<&mut Report, FitrepError> {
        self.reports
            .get_mut(name)
            .ok_or_else(|| FitrepError::UnknownReport {
                name: name.to_string(),
            })
    }
}
