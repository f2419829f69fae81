use std::collections::HashMap;

use super::domain::FitrepError;
use super::report::Report;

/// Name-keyed reports kept in processing order.
///
/// The order is the order reports were first added and is treated as the
/// order they were adjudicated. Re-adding a name overwrites the report in
/// place without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportCollection {
    reports: Vec<Report>,
    positions: HashMap<String, usize>,
}

impl ReportCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new report, or overwrites the stored report with the same
    /// name. Returns the overwritten report, if any.
    pub fn insert(&mut self, report: Report) -> Option<Report> {
        match self.positions.get(&report.name) {
            Some(&position) => Some(std::mem::replace(&mut self.reports[position], report)),
            None => {
                self.positions.insert(report.name.clone(), self.reports.len());
                self.reports.push(report);
                None
            }
        }
    }

    /// Overwrites an existing report, failing if the name was never added.
    pub fn replace(&mut self, report: Report) -> Result<Report, FitrepError> {
        let position = *self
            .positions
            .get(&report.name)
            .ok_or_else(|| FitrepError::UnknownReport {
                name: report.name.clone(),
            })?;
        Ok(std::mem::replace(&mut self.reports[position], report))
    }

    /// Removes a report and closes the gap in the processing order.
    pub fn remove(&mut self, name: &str) -> Option<Report> {
        let position = self.positions.remove(name)?;
        let removed = self.reports.remove(position);
        for (index, report) in self.reports.iter().enumerate().skip(position) {
            self.positions.insert(report.name.clone(), index);
        }
        Some(removed)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Report> {
        self.positions
            .get(name)
            .map(|&position| &self.reports[position])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Report> {
        self.positions
            .get(name)
            .map(|&position| &mut self.reports[position])
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Names in processing order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.reports.iter().map(|report| report.name.as_str())
    }

    /// Reports in processing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Report> {
        self.reports.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Report> {
        self.reports.iter_mut()
    }
}

impl<'a> IntoIterator for &'a ReportCollection {
    type Item = &'a Report;
    type IntoIter = std::slice::Iter<'a, Report>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Report> for ReportCollection {
    fn from_iter<T: IntoIterator<Item = Report>>(iter: T) -> Self {
        let mut collection = Self::new();
        for report in iter {
            collection.insert(report);
        }
        collection
    }
}
