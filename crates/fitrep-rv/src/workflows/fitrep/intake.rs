use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::domain::{Category, FitrepError, ScoreLetter};

pub const MAX_NAME_LENGTH: usize = 25;

/// Business rule rejected at intake, before a report reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("must input a name")]
    MissingName,
    #[error("name too long (max {max} characters)")]
    NameTooLong { max: usize },
    #[error("must mark all scores (missing {})", .category.label())]
    MissingGrade { category: Category },
    #[error("can't have all scores be 'H'")]
    AllNotObserved,
}

/// One evaluee's grades as received from an outer surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSubmission {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    pub grades: BTreeMap<String, String>,
}

impl GradeSubmission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rank: None,
            grades: BTreeMap::new(),
        }
    }

    pub fn grade(mut self, category: Category, letter: ScoreLetter) -> Self {
        self.grades
            .insert(category.label().to_string(), letter.to_string());
        self
    }

    /// Marks every category with the same letter.
    pub fn uniform(name: impl Into<String>, letter: ScoreLetter) -> Self {
        Category::ordered()
            .into_iter()
            .fold(Self::new(name), |submission, category| {
                submission.grade(category, letter)
            })
    }
}

/// Checks a submitted name and grade sheet and returns the typed grades.
///
/// Every category must be marked and at least one mark must be observed.
/// Unrecognised category labels are ignored, matching `Report::from_grades`.
pub fn validate_report_inputs<I, K, V>(
    name: &str,
    grades: I,
) -> Result<BTreeMap<Category, ScoreLetter>, FitrepError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(IntakeViolation::MissingName.into());
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(IntakeViolation::NameTooLong {
            max: MAX_NAME_LENGTH,
        }
        .into());
    }

    let mut parsed = BTreeMap::new();
    for (label, letter) in grades {
        if let Some(category) = Category::from_label(label.as_ref()) {
            parsed.insert(category, ScoreLetter::parse(letter.as_ref())?);
        }
    }

    if let Some(category) = Category::ordered()
        .into_iter()
        .find(|category| !parsed.contains_key(category))
    {
        return Err(IntakeViolation::MissingGrade { category }.into());
    }

    if parsed.values().all(|letter| !letter.is_observed()) {
        return Err(IntakeViolation::AllNotObserved.into());
    }

    Ok(parsed)
}
