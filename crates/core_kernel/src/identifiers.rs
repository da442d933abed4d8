//! Strongly-typed identifiers for domain entities
//!
//! The academy roster uses human-readable codes (`VIN-0001`) rather than
//! UUIDs, so identifiers are newtypes over `String`. Invoice identifiers are
//! derived, never random: `{student_id}-{yyyyMM}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::temporal::{BillingMonth, TemporalError};

macro_rules! define_code_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its code
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Returns the identifier code
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_string())
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }
    };
}

define_code_id!(StudentId);
define_code_id!(InvoiceId);

/// Errors raised when an invoice identifier cannot be decomposed
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invoice id '{0}' has no month suffix")]
    MissingMonth(String),

    #[error("Invoice id '{id}' has an invalid month: {source}")]
    InvalidMonth {
        id: String,
        #[source]
        source: TemporalError,
    },
}

impl InvoiceId {
    /// Builds the deterministic id of a student's invoice for a month
    pub fn for_month(student_id: &StudentId, month: BillingMonth) -> Self {
        Self(format!("{}-{}", student_id, month.yyyymm()))
    }

    /// Splits the id back into its student id and billing month
    ///
    /// Student codes may themselves contain `-`, so the split happens on the
    /// last separator.
    pub fn parts(&self) -> Result<(StudentId, BillingMonth), IdentifierError> {
        let (student, month) = self
            .0
            .rsplit_once('-')
            .ok_or_else(|| IdentifierError::MissingMonth(self.0.clone()))?;

        let month = BillingMonth::from_str(month).map_err(|source| IdentifierError::InvalidMonth {
            id: self.0.clone(),
            source,
        })?;

        Ok((StudentId::new(student), month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_id_for_month() {
        let student = StudentId::new("VIN-0007");
        let month = BillingMonth::new(2024, 7).unwrap();

        let id = InvoiceId::for_month(&student, month);
        assert_eq!(id.as_str(), "VIN-0007-202407");
    }

    #[test]
    fn test_invoice_id_parts_uses_last_separator() {
        let id = InvoiceId::new("VIN-0007-202401");
        let (student, month) = id.parts().unwrap();

        assert_eq!(student, StudentId::new("VIN-0007"));
        assert_eq!(month, BillingMonth::new(2024, 1).unwrap());
    }

    #[test]
    fn test_invoice_id_without_month() {
        let id = InvoiceId::new("orphan");
        assert!(matches!(id.parts(), Err(IdentifierError::MissingMonth(_))));
    }

    #[test]
    fn test_invoice_id_with_bad_month() {
        let id = InvoiceId::new("VIN-0001-202413");
        assert!(matches!(id.parts(), Err(IdentifierError::InvalidMonth { .. })));
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = StudentId::new("VIN-0001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"VIN-0001\"");
    }
}
