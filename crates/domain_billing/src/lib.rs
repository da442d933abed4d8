//! Billing Domain - Monthly Tuition Invoices
//!
//! This crate produces and maintains the academy's tuition invoices.
//!
//! # Pipeline
//!
//! ```text
//! StudentSource ──► InvoiceSynthesizer ──► BillingStore ──► BillingService
//!                        │                                      │
//!                   FeeSchedule                          calculate_total,
//!                   assign_status                        BillingSummary
//! ```
//!
//! - **Totals**: `calculate_total` sums line items and the admission fee,
//!   subtracts the discount and applies the tax percentage, unrounded.
//! - **Synthesis**: a rolling window of monthly invoices per student, with
//!   deterministic demo statuses derived from roster position.
//! - **Store**: one process-wide invoice list, replaced wholesale.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingConfig, BillingService, InMemoryBillingStore, InvoiceSynthesizer};
//!
//! let synthesizer = InvoiceSynthesizer::new(&BillingConfig::default(), Arc::new(SystemClock))?;
//! let service = BillingService::new(roster, Arc::new(InMemoryBillingStore::new()), synthesizer);
//!
//! let invoices = service.get_billing_data(false).await?;
//! let payable = calculate_total(&invoices[0]);
//! ```

pub mod config;
pub mod error;
pub mod fees;
pub mod invoice;
pub mod service;
pub mod status;
pub mod store;
pub mod summary;
pub mod synthesizer;
pub mod total;

pub use config::BillingConfig;
pub use error::{BillingError, SynthesisError};
pub use fees::{CourseFee, FeeSchedule, ResolvedFee};
pub use invoice::{Activity, Invoice, TUITION_FEE};
pub use service::BillingService;
pub use status::{assign_status, InvoiceStatus, StatusHeuristic};
pub use store::{BillingStore, InMemoryBillingStore};
pub use summary::{BillingSummary, MonthlyCollection};
pub use synthesizer::InvoiceSynthesizer;
pub use total::{calculate_total, TotalBreakdown};
