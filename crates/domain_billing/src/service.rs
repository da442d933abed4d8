//! Billing application service
//!
//! `BillingService` is what the billing, accounts and my-payments views
//! talk to. It ties the student source, the synthesizer and the invoice
//! store together:
//!
//! - `get_billing_data(false)` serves the stored list, synthesizing only
//!   when nothing is stored yet
//! - `get_billing_data(true)` always re-reads the roster and re-synthesizes
//! - `update_billing_data(list)` overwrites the stored list (last write wins)
//!
//! Payments recorded through `record_payment` hold a write gate across their
//! read-modify-write, so two payments made through the same service never
//! lose each other. Writers that go through `update_billing_data` directly
//! still race.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use core_kernel::{Currency, InvoiceId, StudentId};
use domain_student::StudentSource;

use crate::error::{BillingError, SynthesisError};
use crate::invoice::Invoice;
use crate::store::BillingStore;
use crate::summary::BillingSummary;
use crate::synthesizer::InvoiceSynthesizer;

/// Entry point for reading and updating the academy's invoices
pub struct BillingService {
    students: Arc<dyn StudentSource>,
    store: Arc<dyn BillingStore>,
    synthesizer: InvoiceSynthesizer,
    currency: Currency,
    write_gate: Mutex<()>,
}

impl BillingService {
    /// Creates a service over a student source and a store
    pub fn new(
        students: Arc<dyn StudentSource>,
        store: Arc<dyn BillingStore>,
        synthesizer: InvoiceSynthesizer,
    ) -> Self {
        Self {
            students,
            store,
            synthesizer,
            currency: Currency::INR,
            write_gate: Mutex::new(()),
        }
    }

    /// Sets the currency used for summaries
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn synthesizer(&self) -> &InvoiceSynthesizer {
        &self.synthesizer
    }

    /// Returns the invoice list, regenerating it when forced or not yet stored
    ///
    /// # Errors
    ///
    /// `BillingError::Synthesis` when the student source fails. The stored
    /// list, if any, is left untouched.
    #[instrument(skip(self))]
    pub async fn get_billing_data(
        &self,
        force_refresh: bool,
    ) -> Result<Arc<Vec<Invoice>>, BillingError> {
        if !force_refresh {
            if let Some(cached) = self.store.load().await {
                debug!(invoices = cached.len(), "Serving cached invoices");
                return Ok(cached);
            }
        }

        let invoices = self.synthesize().await?;
        Ok(self.store.replace(invoices).await)
    }

    /// Replaces the stored invoice list with `invoices`
    #[instrument(skip(self, invoices), fields(invoices = invoices.len()))]
    pub async fn update_billing_data(&self, invoices: Vec<Invoice>) {
        self.store.replace(invoices).await;
        info!("Invoice list replaced by caller");
    }

    /// Drops the stored list
    pub async fn invalidate(&self) {
        self.store.invalidate().await;
    }

    /// Looks up one invoice by exact id
    ///
    /// Ids supplied through `update_billing_data` are matched as stored,
    /// whatever their shape.
    ///
    /// # Errors
    ///
    /// - `InvoiceNotFound` if no stored invoice has this id
    /// - `InvalidInvoiceId` if none matches and the id is not `{student}-{yyyyMM}`
    pub async fn find_invoice(&self, id: &InvoiceId) -> Result<Invoice, BillingError> {
        let invoices = self.get_billing_data(false).await?;
        invoices
            .iter()
            .find(|invoice| &invoice.id == id)
            .cloned()
            .ok_or_else(|| missing_invoice(id))
    }

    /// Invoices billed to one student, most recent first
    pub async fn invoices_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Invoice>, BillingError> {
        let invoices = self.get_billing_data(false).await?;
        let mut own: Vec<Invoice> = invoices
            .iter()
            .filter(|invoice| &invoice.student_id == student_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.invoice_date.cmp(&a.invoice_date));
        Ok(own)
    }

    /// Marks an invoice paid and writes the whole list back
    ///
    /// # Errors
    ///
    /// - `InvoiceNotFound` or `InvalidInvoiceId` as for `find_invoice`
    /// - `InvalidStatusTransition` if the invoice is already paid
    #[instrument(skip(self))]
    pub async fn record_payment(
        &self,
        id: &InvoiceId,
        payment_date: NaiveDate,
    ) -> Result<Invoice, BillingError> {
        let _gate = self.write_gate.lock().await;

        let current = self.get_billing_data(false).await?;
        let mut invoices = current.as_ref().clone();

        let invoice = invoices
            .iter_mut()
            .find(|invoice| &invoice.id == id)
            .ok_or_else(|| missing_invoice(id))?;

        if let Err(e) = invoice.mark_paid(payment_date) {
            warn!(invoice_id = %id, status = ?invoice.status, "Payment rejected");
            return Err(e);
        }
        let paid = invoice.clone();

        self.store.replace(invoices).await;
        info!(invoice_id = %id, amount = %paid.total(), %payment_date, "Payment recorded");
        Ok(paid)
    }

    /// Moves every `Due` invoice whose due date is before `today` to `Overdue`
    ///
    /// Returns the number of invoices changed.
    #[instrument(skip(self))]
    pub async fn sweep_overdue(&self, today: NaiveDate) -> Result<usize, BillingError> {
        let _gate = self.write_gate.lock().await;

        let current = self.get_billing_data(false).await?;
        let mut invoices = current.as_ref().clone();

        let mut changed = 0;
        for invoice in invoices.iter_mut().filter(|invoice| invoice.is_past_due(today)) {
            invoice.mark_overdue()?;
            changed += 1;
        }

        if changed > 0 {
            self.store.replace(invoices).await;
        }
        info!(changed, "Overdue sweep complete");
        Ok(changed)
    }

    /// Aggregate totals over the current invoice list
    pub async fn summary(&self) -> Result<BillingSummary, BillingError> {
        let invoices = self.get_billing_data(false).await?;
        Ok(BillingSummary::from_invoices(&invoices, self.currency))
    }

    async fn synthesize(&self) -> Result<Vec<Invoice>, BillingError> {
        let students = self.students.list_students().await.map_err(|e| {
            error!(error = %e, "Could not read students for invoice synthesis");
            SynthesisError::StudentSource(e)
        })?;

        self.synthesizer.synthesize(&students).map_err(|e| {
            error!(error = %e, "Invoice synthesis failed");
            BillingError::Synthesis(e)
        })
    }
}

/// Error for an id no stored invoice carries
fn missing_invoice(id: &InvoiceId) -> BillingError {
    match id.parts() {
        Ok(_) => BillingError::InvoiceNotFound(id.to_string()),
        Err(e) => BillingError::InvalidInvoiceId(e),
    }
}
