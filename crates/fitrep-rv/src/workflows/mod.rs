pub mod fitrep;
pub mod gradesheet;
