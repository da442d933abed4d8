//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::identifiers::{IdentifierError, InvoiceId};
use core_kernel::money::MoneyError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("window_months must be at least 1");

    match error {
        CoreError::Configuration(msg) => assert!(msg.contains("window_months")),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::CurrencyMismatch("INR".to_string(), "USD".to_string());
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(_)));
    assert!(core_error.to_string().contains("INR"));
}

#[test]
fn test_core_error_from_temporal_error() {
    let core_error: CoreError = TemporalError::InvalidMonth(13).into();

    assert!(matches!(core_error, CoreError::Temporal(TemporalError::InvalidMonth(13))));
}

#[test]
fn test_core_error_from_identifier_error() {
    let err = InvoiceId::new("no_month_here").parts().unwrap_err();
    assert!(matches!(err, IdentifierError::MissingMonth(_)));

    let core_error: CoreError = err.into();
    assert!(core_error.to_string().contains("no_month_here"));
}
