use super::common::*;
use crate::workflows::fitrep::{
    BaselineProfile, BaselineViolation, FitrepError, IntakeViolation, ProfileSession,
    ScoreLetter,
};

fn session() -> ProfileSession {
    ProfileSession::new(established_baseline(), false).expect("valid baseline")
}

#[test]
fn rejects_invalid_baseline() {
    let result = ProfileSession::new(BaselineProfile::new("Capt", 3.0, 2.0, 3.5, 10), true);
    assert!(matches!(
        result,
        Err(FitrepError::InvalidBaselineProfile(
            BaselineViolation::AverageAboveHigh
        ))
    ));
}

#[test]
fn unrounds_baseline_high_and_low_when_enabled() {
    let session = ProfileSession::new(established_baseline(), true).expect("valid");
    assert!((session.origin().high - 53.0 / 13.0).abs() < 1e-12);
    assert_eq!(session.origin().low, 2.0);
    assert_eq!(session.origin().average, 3.34);
    assert_eq!(session.working().high, session.origin().high);
    assert_eq!(session.working().label, "Active");
}

#[test]
fn unrounding_accepts_averages_sitting_on_high_or_low() {
    let at_low = ProfileSession::new(BaselineProfile::new("Capt", 4.0, 3.14, 3.14, 10), true)
        .expect("entered values are valid");
    assert!((at_low.origin().low - 44.0 / 14.0).abs() < 1e-12);
    assert_eq!(at_low.origin().average, 3.14);

    let mut at_high =
        ProfileSession::new(BaselineProfile::new("Capt", 4.08, 2.0, 4.08, 10), true)
            .expect("entered values are valid");
    assert!((at_high.origin().high - 53.0 / 13.0).abs() < 1e-12);

    let report = at_high
        .submit("ADAMS", sheet(ScoreLetter::D))
        .expect("ADAMS accepted");
    assert_eq!(at_high.working().count, 11);
    assert!(report.rv_cumulative_min() >= 80.0);
}

#[test]
fn preview_leaves_canonical_state_alone() {
    let mut session = session();
    session
        .submit("ADAMS", sheet(ScoreLetter::D))
        .expect("ADAMS accepted");
    let working_before = session.working().clone();
    let reports_before = session.reports().clone();

    let preview = session
        .preview("BAKER", sheet(ScoreLetter::E))
        .expect("BAKER previewed");

    assert_eq!(preview.reports.len(), 2);
    assert_eq!(preview.profile.count, 12);
    assert_eq!(preview.report.name, "BAKER");
    assert!(preview.report.rv_cumulative_min() > 0.0);
    assert_eq!(session.working(), &working_before);
    assert_eq!(session.reports(), &reports_before);

    let committed = session.commit(preview);
    assert_eq!(committed.name, "BAKER");
    assert_eq!(session.working().count, 12);
    assert_eq!(
        session.reports().names().collect::<Vec<_>>(),
        vec!["ADAMS", "BAKER"]
    );
}

#[test]
fn regrading_keeps_processing_position() {
    let mut session = session();
    for (name, letter) in [
        ("A", ScoreLetter::D),
        ("B", ScoreLetter::C),
        ("C", ScoreLetter::B),
    ] {
        session.submit(name, sheet(letter)).expect("accepted");
    }

    let regraded = session
        .submit("B", sheet(ScoreLetter::F))
        .expect("B regraded");

    assert_eq!(regraded.report_average(), 6.0);
    assert_eq!(
        session.reports().names().collect::<Vec<_>>(),
        vec!["A", "B", "C"]
    );
    assert_eq!(session.working().count, 13);
    assert_eq!(session.working().high, 6.0);
}

#[test]
fn rejected_intake_changes_nothing() {
    let mut session = session();
    session
        .submit("ADAMS", sheet(ScoreLetter::D))
        .expect("ADAMS accepted");

    let all_h = session.submit("BAKER", sheet(ScoreLetter::H));
    assert_eq!(
        all_h.expect_err("all H rejected"),
        FitrepError::InvalidReport(IntakeViolation::AllNotObserved)
    );

    let mut partial = sheet(ScoreLetter::C);
    partial.pop();
    assert!(matches!(
        session.submit("BAKER", partial),
        Err(FitrepError::InvalidReport(IntakeViolation::MissingGrade { .. }))
    ));

    assert_eq!(session.reports().len(), 1);
    assert_eq!(session.working().count, 11);
}

#[test]
fn narrative_inputs_survive_regrading() {
    let mut session = session();
    session
        .submit("ADAMS", sheet(ScoreLetter::D))
        .expect("ADAMS accepted");
    session
        .set_narrative_inputs("ADAMS", "Company Commander", "Led 120 Marines", "Deployed")
        .expect("narrative stored");
    session
        .record_section_i("ADAMS", "A superb officer.")
        .expect("section I stored");
    assert_eq!(session.increment_generation_counter("ADAMS"), Ok(1));
    assert_eq!(session.increment_generation_counter("ADAMS"), Ok(2));

    session
        .submit("ADAMS", sheet(ScoreLetter::E))
        .expect("ADAMS regraded");

    let adams = session.report("ADAMS").expect("ADAMS present");
    assert_eq!(adams.narrative.billet, "Company Commander");
    assert_eq!(adams.narrative.section_i, "A superb officer.");
    assert_eq!(adams.narrative.generations, 2);
    assert_eq!(adams.report_average(), 5.0);

    let views = session.narrative_views();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].accomplishments, "Led 120 Marines");
    assert_eq!(views[0].rv_cumulative_max, adams.rv_cumulative_max());
}

#[test]
fn narrative_edits_require_known_report() {
    let mut session = session();
    let expected = FitrepError::UnknownReport {
        name: "NOBODY".to_string(),
    };
    assert_eq!(
        session.set_narrative_inputs("NOBODY", "", "", ""),
        Err(expected.clone())
    );
    assert_eq!(session.increment_generation_counter("NOBODY"), Err(expected));
}

#[test]
fn removing_a_report_replays_the_rest() {
    let mut session = session();
    session
        .submit("ADAMS", sheet(ScoreLetter::G))
        .expect("ADAMS accepted");
    session
        .submit("BAKER", sheet(ScoreLetter::C))
        .expect("BAKER accepted");
    assert_eq!(session.working().high, 7.0);

    let removed = session.remove("ADAMS").expect("ADAMS removed");

    assert_eq!(removed.name, "ADAMS");
    assert_eq!(session.working().count, 11);
    assert_eq!(session.working().high, 4.08);
    let baker = session.report("BAKER").expect("BAKER present");
    assert_eq!(baker.process_rv(), baker.cumulative_rv());
    assert!(session.remove("ADAMS").is_err());
}

#[test]
fn batch_submission_is_all_or_nothing() {
    let mut session = session();
    let mut bad = submission("CLARK", ScoreLetter::C);
    bad.grades.insert("Judgment".to_string(), "X".to_string());

    let result = session.submit_batch(&[
        submission("ADAMS", ScoreLetter::D),
        bad,
    ]);

    assert!(matches!(result, Err(FitrepError::InvalidLetterGrade { .. })));
    assert!(session.reports().is_empty());
    assert_eq!(session.working().count, 10);

    let finals = session
        .submit_batch(&[
            submission("ADAMS", ScoreLetter::D),
            submission("BAKER", ScoreLetter::C),
        ])
        .expect("batch accepted");
    assert_eq!(finals.count, 12);
    assert_eq!(session.view().reports.len(), 2);
}

#[test]
fn summary_lists_committed_reports() {
    let mut session = session();
    session
        .submit("ADAMS", sheet(ScoreLetter::D))
        .expect("ADAMS accepted");

    let text = session.summary().to_string();
    assert!(text.contains("Original Capt Profile - 10 Reports"));
    assert!(text.contains("Active Capt Profile - 11 Reports"));
    assert!(text.contains("Capt ADAMS:"));
}
