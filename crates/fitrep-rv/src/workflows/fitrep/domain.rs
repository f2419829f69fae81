use serde::{Deserialize, Serialize};
use std::fmt;

use super::intake::IntakeViolation;
use super::profile::BaselineViolation;

/// Number of graded attributes on a fitness report.
pub const CATEGORY_COUNT: usize = 14;

/// Letter grade marked against a single attribute.
///
/// `H` is "not observed": it decodes to `0` and is excluded from the report
/// average rather than counted as a zero score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl ScoreLetter {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::A,
            Self::B,
            Self::C,
            Self::D,
            Self::E,
            Self::F,
            Self::G,
            Self::H,
        ]
    }

    /// Numeric value on the 0-7 scale. `H` maps to the excluded sentinel `0`.
    pub const fn value(self) -> u8 {
        match self {
            Self::A => 1,
            Self::B => 2,
            Self::C => 3,
            Self::D => 4,
            Self::E => 5,
            Self::F => 6,
            Self::G => 7,
            Self::H => 0,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
        }
    }

    pub const fn is_observed(self) -> bool {
        !matches!(self, Self::H)
    }

    /// Parses a single letter. Surrounding whitespace is ignored, case is not.
    pub fn parse(raw: &str) -> Result<Self, FitrepError> {
        match raw.trim() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            "G" => Ok(Self::G),
            "H" => Ok(Self::H),
            _ => Err(FitrepError::InvalidLetterGrade {
                letter: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScoreLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Decodes a letter grade into its numeric score.
pub fn decode(letter: &str) -> Result<u8, FitrepError> {
    ScoreLetter::parse(letter).map(ScoreLetter::value)
}

/// The fixed, ordered list of graded attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Performance,
    Proficiency,
    Courage,
    EffectivenessUnderStress,
    Initiative,
    LeadingSubordinates,
    DevelopingSubordinates,
    SettingTheExample,
    EnsuringWellBeing,
    CommunicationSkills,
    Pme,
    DecisionMaking,
    Judgment,
    Reports,
}

impl Category {
    pub const fn ordered() -> [Self; CATEGORY_COUNT] {
        [
            Self::Performance,
            Self::Proficiency,
            Self::Courage,
            Self::EffectivenessUnderStress,
            Self::Initiative,
            Self::LeadingSubordinates,
            Self::DevelopingSubordinates,
            Self::SettingTheExample,
            Self::EnsuringWellBeing,
            Self::CommunicationSkills,
            Self::Pme,
            Self::DecisionMaking,
            Self::Judgment,
            Self::Reports,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Proficiency => "Proficiency",
            Self::Courage => "Courage",
            Self::EffectivenessUnderStress => "Effectiveness Under Stress",
            Self::Initiative => "Initiative",
            Self::LeadingSubordinates => "Leading Subordinates",
            Self::DevelopingSubordinates => "Developing Subordinates",
            Self::SettingTheExample => "Setting the Example",
            Self::EnsuringWellBeing => "Ensuring Well-being",
            Self::CommunicationSkills => "Communication Skills",
            Self::Pme => "PME",
            Self::DecisionMaking => "Decision Making",
            Self::Judgment => "Judgment",
            Self::Reports => "Reports",
        }
    }

    /// Slot of this category in a report's score vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Errors raised by the fitness report core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitrepError {
    #[error("invalid letter grade '{letter}': expected one of A-H")]
    InvalidLetterGrade { letter: String },
    #[error("invalid baseline profile: {0}")]
    InvalidBaselineProfile(#[from] BaselineViolation),
    #[error("no report recorded for '{name}'")]
    UnknownReport { name: String },
    #[error("report rejected: {0}")]
    InvalidReport(#[from] IntakeViolation),
}
