//! Billing domain errors

use thiserror::Error;

use core_kernel::{IdentifierError, PortError};

use crate::status::InvoiceStatus;

/// Failure to produce the invoice list
///
/// Kept separate from `BillingError` so callers can tell "the roster is
/// empty" (an empty list) apart from "the roster could not be read".
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The student source failed
    #[error("Student source failed: {0}")]
    StudentSource(#[from] PortError),

    /// Date arithmetic left the supported calendar range
    #[error("Invoice date out of range for student {student_id} at offset {offset}")]
    DateOutOfRange {
        student_id: String,
        offset: u32,
    },
}

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Invoice synthesis failed
    #[error("Invoice synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Invoice id is not of the form `{student}-{yyyyMM}`
    #[error("Invalid invoice id: {0}")]
    InvalidInvoiceId(#[from] IdentifierError),

    /// Status change not permitted by the invoice lifecycle
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },
}

impl BillingError {
    /// Returns true when the failure came from the student source
    pub fn is_synthesis_failure(&self) -> bool {
        matches!(self, BillingError::Synthesis(_))
    }
}
