//! Enrolled students
//!
//! A student record is owned by the admissions side of the academy. Billing
//! only ever reads it and copies the contact fields onto each invoice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::StudentId;

use crate::error::StudentError;

/// Enrolment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    /// Attending classes
    #[default]
    Enrolled,
    /// Temporarily not attending
    OnBreak,
    /// Left the academy
    Discontinued,
}

/// A student enrolled at the academy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Student {
    /// Roster code, e.g. `VIN-0001`
    pub id: StudentId,
    /// Full name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Contact email
    #[validate(email)]
    pub email: Option<String>,
    /// WhatsApp number including country code, digits only
    #[validate(length(min = 10, max = 15))]
    pub whatsapp_number: Option<String>,
    /// Date the student joined
    pub enrollment_date: NaiveDate,
    /// Course code the student enrolled for, e.g. `bharatanatyam`
    #[validate(length(min = 1, message = "desired course must not be empty"))]
    pub desired_course: String,
    /// Enrolment status
    pub status: StudentStatus,
}

impl Student {
    /// Creates an enrolled student with no contact details
    pub fn new(
        id: impl Into<StudentId>,
        name: impl Into<String>,
        desired_course: impl Into<String>,
        enrollment_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            whatsapp_number: None,
            enrollment_date,
            desired_course: desired_course.into(),
            status: StudentStatus::Enrolled,
        }
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the WhatsApp number
    pub fn with_whatsapp(mut self, number: impl Into<String>) -> Self {
        self.whatsapp_number = Some(number.into());
        self
    }

    /// Sets the enrolment status
    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = status;
        self
    }

    /// Validates profile and contact fields
    pub fn check(&self) -> Result<(), StudentError> {
        self.validate()?;
        if let Some(number) = &self.whatsapp_number {
            if !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(StudentError::InvalidData(format!(
                    "whatsapp_number must contain digits only: {}",
                    number
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    #[test]
    fn test_new_student_defaults() {
        let student = Student::new("VIN-0001", "Ananya Rao", "bharatanatyam", joined());

        assert_eq!(student.id.as_str(), "VIN-0001");
        assert_eq!(student.status, StudentStatus::Enrolled);
        assert!(student.email.is_none());
        assert!(student.check().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let student = Student::new("VIN-0001", "Ananya Rao", "yoga", joined())
            .with_email("not-an-email");

        assert!(matches!(student.check(), Err(StudentError::InvalidData(_))));
    }

    #[test]
    fn test_whatsapp_must_be_digits() {
        let student = Student::new("VIN-0001", "Ananya Rao", "yoga", joined())
            .with_whatsapp("91-98450-12345");

        assert!(student.check().is_err());

        let ok = Student::new("VIN-0001", "Ananya Rao", "yoga", joined())
            .with_whatsapp("919845012345");
        assert!(ok.check().is_ok());
    }

    #[test]
    fn test_empty_course_rejected() {
        let student = Student::new("VIN-0001", "Ananya Rao", "", joined());
        assert!(student.check().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&StudentStatus::OnBreak).unwrap();
        assert_eq!(json, "\"on_break\"");
    }
}
