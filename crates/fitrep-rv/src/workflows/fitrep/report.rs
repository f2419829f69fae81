use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::{Category, FitrepError, ScoreLetter, CATEGORY_COUNT};

/// Inclusive pair of relative values computed against the low and high
/// average tracks of a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RvRange {
    pub min: f64,
    pub max: f64,
}

impl RvRange {
    /// Orders the two candidates so that `min <= max` always holds.
    pub fn from_candidates(first: f64, second: f64) -> Self {
        Self {
            min: first.min(second),
            max: first.max(second),
        }
    }

    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Narrative inputs and drafts carried alongside a report.
///
/// The recalculation engine never reads these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativePayload {
    pub billet: String,
    pub accomplishments: String,
    pub context: String,
    pub section_i: String,
    pub generations: u32,
}

/// One evaluee's fitness report and its computed relative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub rank: String,
    pub name: String,
    grades: [Option<ScoreLetter>; CATEGORY_COUNT],
    scores: [u8; CATEGORY_COUNT],
    report_average: f64,
    pub(crate) process_rv: RvRange,
    pub(crate) cumulative_rv: RvRange,
    #[serde(default)]
    pub narrative: NarrativePayload,
}

impl Report {
    /// Creates an ungraded report. Every slot is unset and the average is `0`.
    pub fn new(rank: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            name: name.into(),
            grades: [None; CATEGORY_COUNT],
            scores: [0; CATEGORY_COUNT],
            report_average: 0.0,
            process_rv: RvRange::default(),
            cumulative_rv: RvRange::default(),
            narrative: NarrativePayload::default(),
        }
    }

    /// Builds a report from raw `category label -> letter` pairs.
    ///
    /// Labels that do not name a canonical category are ignored; categories
    /// that are absent stay unset and score `0`, the same as `H`.
    pub fn from_grades<I, K, V>(
        rank: impl Into<String>,
        name: impl Into<String>,
        grades: I,
    ) -> Result<Self, FitrepError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (label, letter) in grades {
            let Some(category) = Category::from_label(label.as_ref()) else {
                continue;
            };
            parsed.push((category, ScoreLetter::parse(letter.as_ref())?));
        }

        Ok(Self::with_letters(rank, name, parsed))
    }

    /// Builds a report from already-typed grades.
    pub fn with_letters<I>(rank: impl Into<String>, name: impl Into<String>, grades: I) -> Self
    where
        I: IntoIterator<Item = (Category, ScoreLetter)>,
    {
        let mut report = Self::new(rank, name);
        for (category, letter) in grades {
            report.grades[category.index()] = Some(letter);
            report.scores[category.index()] = letter.value();
        }
        report.recompute_average();
        report
    }

    /// Overwrites a single grade and refreshes the average.
    pub fn set_grade(&mut self, category: Category, letter: ScoreLetter) {
        self.grades[category.index()] = Some(letter);
        self.scores[category.index()] = letter.value();
        self.recompute_average();
    }

    /// Re-derives the average as the mean of the non-zero score slots.
    pub fn recompute_average(&mut self) {
        let (sum, observed) = self
            .scores
            .iter()
            .filter(|score| **score != 0)
            .fold((0u32, 0u32), |(sum, observed), score| {
                (sum + u32::from(*score), observed + 1)
            });

        self.report_average = if observed == 0 {
            0.0
        } else {
            f64::from(sum) / f64::from(observed)
        };
    }

    pub fn report_average(&self) -> f64 {
        self.report_average
    }

    pub fn scores(&self) -> &[u8; CATEGORY_COUNT] {
        &self.scores
    }

    pub fn grade(&self, category: Category) -> Option<ScoreLetter> {
        self.grades[category.index()]
    }

    pub fn grades(&self) -> impl Iterator<Item = (Category, Option<ScoreLetter>)> + '_ {
        Category::ordered()
            .into_iter()
            .map(move |category| (category, self.grades[category.index()]))
    }

    pub fn process_rv(&self) -> RvRange {
        self.process_rv
    }

    pub fn cumulative_rv(&self) -> RvRange {
        self.cumulative_rv
    }

    pub fn rv_process_min(&self) -> f64 {
        self.process_rv.min
    }

    pub fn rv_process_max(&self) -> f64 {
        self.process_rv.max
    }

    pub fn rv_cumulative_min(&self) -> f64 {
        self.cumulative_rv.min
    }

    pub fn rv_cumulative_max(&self) -> f64 {
        self.cumulative_rv.max
    }

    /// Renders the grades in the form's grouped layout, e.g. `CC CCC CCCCC CCC H`.
    pub fn letter_block(&self) -> String {
        let mut letters = String::with_capacity(CATEGORY_COUNT);
        for grade in &self.grades {
            match grade {
                Some(letter) => letters.push(letter.as_char()),
                None => return "Incomplete Scores".to_string(),
            }
        }

        // Mission, character, leadership, intellect, reports.
        format!(
            "{} {} {} {} {}",
            &letters[0..2],
            &letters[2..5],
            &letters[5..10],
            &letters[10..13],
            &letters[13..14]
        )
    }

    pub fn narrative_view(&self) -> NarrativeView {
        NarrativeView {
            rank: self.rank.clone(),
            name: self.name.clone(),
            report_average: self.report_average,
            rv_cumulative_min: self.cumulative_rv.min,
            rv_cumulative_max: self.cumulative_rv.max,
            accomplishments: self.narrative.accomplishments.clone(),
            context: self.narrative.context.clone(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}:", self.rank, self.name)?;
        writeln!(f, "Rpt Avg:   {:.2}", self.report_average)?;
        writeln!(
            f,
            "RV Proc:   {:.2} - {:.2}",
            self.process_rv.min, self.process_rv.max
        )?;
        writeln!(
            f,
            "RV Cum:    {:.2} - {:.2}",
            self.cumulative_rv.min, self.cumulative_rv.max
        )?;
        write!(f, "Scores:    {}", self.letter_block())?;
        if !self.narrative.billet.is_empty() {
            write!(f, "\nBillet:    {}", self.narrative.billet)?;
        }
        Ok(())
    }
}

/// Read-only projection handed to narrative drafting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeView {
    pub rank: String,
    pub name: String,
    pub report_average: f64,
    pub rv_cumulative_min: f64,
    pub rv_cumulative_max: f64,
    pub accomplishments: String,
    pub context: String,
}
