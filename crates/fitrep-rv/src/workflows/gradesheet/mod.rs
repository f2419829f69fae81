//! CSV grade sheets: one row per evaluee, one column per graded attribute,
//! rows in processing order.

mod normalizer;
mod parser;

use crate::workflows::fitrep::GradeSubmission;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum GradeSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingNameColumn,
    MissingName { line: usize },
}

impl std::fmt::Display for GradeSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeSheetImportError::Io(err) => write!(f, "failed to read grade sheet: {}", err),
            GradeSheetImportError::Csv(err) => write!(f, "invalid grade sheet CSV data: {}", err),
            GradeSheetImportError::MissingNameColumn => {
                write!(f, "grade sheet has no 'Name' column")
            }
            GradeSheetImportError::MissingName { line } => {
                write!(f, "grade sheet row on line {} has no name", line)
            }
        }
    }
}

impl std::error::Error for GradeSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GradeSheetImportError::Io(err) => Some(err),
            GradeSheetImportError::Csv(err) => Some(err),
            GradeSheetImportError::MissingNameColumn
            | GradeSheetImportError::MissingName { .. } => None,
        }
    }
}

impl From<std::io::Error> for GradeSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for GradeSheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct GradeSheetImporter;

impl GradeSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<GradeSubmission>, GradeSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads submissions in row order. Blank cells are left ungraded and
    /// unrecognised columns are skipped; letters are not validated here.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<GradeSubmission>, GradeSheetImportError> {
        parser::parse_submissions(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fitrep::{Category, ScoreLetter};
    use std::io::Cursor;

    const SHEET: &str = "\
Name,Rank,Performance,Proficiency,Courage,Effectiveness Under Stress,Initiative,Leading Subordinates,Developing Subordinates,Setting the Example,Ensuring Well-being,Communication Skills,PME,Decision Making,Judgment,Reports,Notes
ADAMS,Capt,D,D,D,D,D,D,D,D,D,D,D,D,D,H,top performer
 BAKER ,,c,C,C,C,C,C,C,C,C,C,C,C,C,C,
";

    #[test]
    fn imports_rows_in_file_order() {
        let submissions =
            GradeSheetImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses");

        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].name, "ADAMS");
        assert_eq!(submissions[0].rank.as_deref(), Some("Capt"));
        assert_eq!(submissions[0].grades.len(), 14);
        assert_eq!(
            submissions[0].grades.get(Category::Reports.label()).map(String::as_str),
            Some("H")
        );

        assert_eq!(submissions[1].name, "BAKER");
        assert_eq!(submissions[1].rank, None);
        assert_eq!(
            submissions[1]
                .grades
                .get(Category::Performance.label())
                .map(String::as_str),
            Some(ScoreLetter::C.to_string().as_str())
        );
    }

    #[test]
    fn rejects_sheets_without_name_column() {
        let result = GradeSheetImporter::from_reader(Cursor::new("Rank,Performance\nCapt,C\n"));
        assert!(matches!(
            result,
            Err(GradeSheetImportError::MissingNameColumn)
        ));
    }

    #[test]
    fn reports_line_of_unnamed_rows() {
        let result =
            GradeSheetImporter::from_reader(Cursor::new("Name,Performance\nADAMS,C\n,D\n"));
        match result {
            Err(GradeSheetImportError::MissingName { line }) => assert_eq!(line, 3),
            other => panic!("expected missing name error, got {other:?}"),
        }
    }
}
