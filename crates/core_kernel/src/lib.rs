//! Core Kernel - Foundational types for the academy billing system
//!
//! This crate provides the building blocks shared by the student and billing
//! domains:
//! - Money types with precise decimal arithmetic
//! - Billing months, month arithmetic and injectable clocks
//! - Roster-code identifiers
//! - Port traits for swappable collaborators

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{BillingMonth, Clock, SystemClock, FixedClock, TemporalError};
pub use identifiers::{StudentId, InvoiceId, IdentifierError};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
