use axum::response::Response;
use serde_json::Value;

use crate::workflows::fitrep::{
    BaselineProfile, Category, GradeSubmission, RankProfile, Report, ReportCollection,
    ScoreLetter,
};

/// Single-category report, so its average is exactly the letter's value.
pub(super) fn single_mark_report(name: &str, letter: ScoreLetter) -> Report {
    Report::with_letters("Capt", name, [(Category::Performance, letter)])
}

pub(super) fn uniform_report(name: &str, letter: ScoreLetter) -> Report {
    Report::with_letters(
        "Capt",
        name,
        Category::ordered().map(|category| (category, letter)),
    )
}

pub(super) fn profiles(baseline: &BaselineProfile) -> (RankProfile, RankProfile) {
    let origin = RankProfile::from_baseline("Original", baseline).expect("valid baseline");
    let mut working = origin.clone();
    working.label = "Active".to_string();
    (origin, working)
}

pub(super) fn zero_baseline() -> BaselineProfile {
    BaselineProfile::empty("Capt")
}

pub(super) fn established_baseline() -> BaselineProfile {
    BaselineProfile::new("Capt", 4.08, 2.0, 3.34, 10)
}

pub(super) fn descending_collection() -> ReportCollection {
    [
        single_mark_report("A", ScoreLetter::D),
        single_mark_report("B", ScoreLetter::C),
        single_mark_report("C", ScoreLetter::B),
    ]
    .into_iter()
    .collect()
}

pub(super) fn sheet(letter: ScoreLetter) -> Vec<(&'static str, String)> {
    Category::ordered()
        .into_iter()
        .map(|category| (category.label(), letter.to_string()))
        .collect()
}

pub(super) fn submission(name: &str, letter: ScoreLetter) -> GradeSubmission {
    GradeSubmission::uniform(name, letter)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
