//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for invoice lists that give
//! more meaningful error messages than standard assertions.

use std::collections::HashSet;

use core_kernel::Money;
use domain_billing::{Invoice, InvoiceStatus};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency().code(),
        expected.currency().code()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that no two invoices share an id
pub fn assert_unique_invoice_ids(invoices: &[Invoice]) {
    let mut seen = HashSet::new();
    for invoice in invoices {
        assert!(
            seen.insert(invoice.id.as_str()),
            "Duplicate invoice id {}",
            invoice.id
        );
    }
}

/// Asserts that `payment_date` is set exactly on paid invoices
pub fn assert_payment_dates_consistent(invoices: &[Invoice]) {
    for invoice in invoices {
        let paid = invoice.status == InvoiceStatus::Paid;
        assert_eq!(
            paid,
            invoice.payment_date.is_some(),
            "Invoice {} is {:?} but payment_date is {:?}",
            invoice.id,
            invoice.status,
            invoice.payment_date
        );
    }
}

/// Asserts student-major ordering with each student's invoices most recent first
pub fn assert_student_major_order(invoices: &[Invoice]) {
    let mut finished: HashSet<&str> = HashSet::new();
    for pair in invoices.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.student_id == b.student_id {
            assert!(
                a.invoice_date > b.invoice_date,
                "Invoices {} and {} are not most recent first",
                a.id,
                b.id
            );
        } else {
            finished.insert(a.student_id.as_str());
            assert!(
                !finished.contains(b.student_id.as_str()),
                "Invoices for student {} are not contiguous",
                b.student_id
            );
        }
    }
}

/// Asserts every invoice falls due `days` after it was raised
pub fn assert_due_after(invoices: &[Invoice], days: i64) {
    for invoice in invoices {
        assert_eq!(
            (invoice.due_date - invoice.invoice_date).num_days(),
            days,
            "Invoice {} due {} for invoice date {}",
            invoice.id,
            invoice.due_date,
            invoice.invoice_date
        );
    }
}
