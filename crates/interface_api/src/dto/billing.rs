//! Billing DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_billing::{BillingSummary, Invoice, TotalBreakdown};

/// Query string for `GET /billing`
#[derive(Debug, Default, Deserialize)]
pub struct BillingQuery {
    /// Regenerate the list instead of serving the stored one
    #[serde(default)]
    pub refresh: bool,
}

/// Body for `POST /billing/invoices/:id/payments`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    /// Defaults to today
    pub payment_date: Option<NaiveDate>,
    /// Receipt or transaction reference, logged only
    #[validate(length(min = 1, max = 64))]
    pub reference: Option<String>,
}

/// Body for `PUT /billing`
#[derive(Debug, Deserialize)]
pub struct ReplaceBillingRequest {
    pub invoices: Vec<Invoice>,
}

/// An invoice with its computed total
#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceResponse {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub total: Decimal,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        let total = invoice.total();
        Self { invoice, total }
    }
}

/// An invoice with every intermediate amount
#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceDetailResponse {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub breakdown: TotalBreakdown,
}

impl From<Invoice> for InvoiceDetailResponse {
    fn from(invoice: Invoice) -> Self {
        let breakdown = TotalBreakdown::of(&invoice);
        Self { invoice, breakdown }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplaceBillingResponse {
    pub stored: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SweepResponse {
    pub as_of: NaiveDate,
    pub marked_overdue: usize,
}

/// Accounts view
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: BillingSummary,
    pub collection_rate: Decimal,
}

impl From<BillingSummary> for SummaryResponse {
    fn from(summary: BillingSummary) -> Self {
        let collection_rate = summary.collection_rate();
        Self { summary, collection_rate }
    }
}
