//! Student domain errors

use thiserror::Error;

/// Errors that can occur in the student domain
#[derive(Debug, Error)]
pub enum StudentError {
    /// Student with the given ID was not found
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    /// Attempted to enrol a student id twice
    #[error("Duplicate student: {0}")]
    DuplicateStudent(String),

    /// Contact or profile data failed validation
    #[error("Invalid student data: {0}")]
    InvalidData(String),
}

impl From<validator::ValidationErrors> for StudentError {
    fn from(errors: validator::ValidationErrors) -> Self {
        StudentError::InvalidData(errors.to_string())
    }
}
