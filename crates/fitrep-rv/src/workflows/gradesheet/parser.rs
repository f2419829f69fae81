use super::normalizer::normalize_header;
use super::GradeSheetImportError;
use crate::workflows::fitrep::{Category, GradeSubmission};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Rank,
    Grade(Category),
    Ignored,
}

fn classify(header: &str) -> Column {
    let header = normalize_header(header);
    if header.eq_ignore_ascii_case("name") {
        Column::Name
    } else if header.eq_ignore_ascii_case("rank") {
        Column::Rank
    } else {
        Category::from_label(&header).map_or(Column::Ignored, Column::Grade)
    }
}

pub(crate) fn parse_submissions<R: Read>(
    reader: R,
) -> Result<Vec<GradeSubmission>, GradeSheetImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<Column> = csv_reader.headers()?.iter().map(classify).collect();
    if !columns.contains(&Column::Name) {
        return Err(GradeSheetImportError::MissingNameColumn);
    }

    let mut submissions = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header occupies line 1.
        let line = index + 2;

        let mut submission = GradeSubmission::new(String::new());
        for (column, cell) in columns.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            match column {
                Column::Name => submission.name = cell.to_string(),
                Column::Rank => submission.rank = Some(cell.to_string()),
                Column::Grade(category) => {
                    submission
                        .grades
                        .insert(category.label().to_string(), cell.to_ascii_uppercase());
                }
                Column::Ignored => {}
            }
        }

        if submission.name.is_empty() {
            return Err(GradeSheetImportError::MissingName { line });
        }
        submissions.push(submission);
    }

    Ok(submissions)
}
