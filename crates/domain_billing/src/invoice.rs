//! Tuition invoices
//!
//! An invoice is a denormalized snapshot: student name and contact fields
//! are copied at synthesis time, there is no live join back to the roster.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BillingMonth, InvoiceId, StudentId};
use domain_student::Student;

use crate::error::BillingError;
use crate::status::InvoiceStatus;
use crate::total::calculate_total;

/// Name of the line item every synthesized invoice carries
pub const TUITION_FEE: &str = "Tuition Fee";

/// A line item on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Line item name
    pub name: String,
    /// Free-text description shown under the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fee for this line
    pub fee: Decimal,
}

impl Activity {
    /// Creates a line item without a description
    pub fn new(name: impl Into<String>, fee: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            fee,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The monthly tuition line for a course
    pub fn tuition(course_name: &str, month_name: &str, fee: Decimal) -> Self {
        Self::new(TUITION_FEE, fee).with_description(format!(
            "Tuition Fee for {} for the month of {}",
            course_name, month_name
        ))
    }
}

/// A monthly billing record for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// `{student_id}-{yyyyMM}`
    pub id: InvoiceId,
    /// Billed student
    pub student_id: StudentId,
    /// Student name at synthesis time
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    /// Line items in display order
    pub activities: Vec<Activity>,
    /// One-off admission fee added to the subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_fee: Option<Decimal>,
    /// Flat discount subtracted from the subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    /// Tax as a percentage of the discounted subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    pub status: InvoiceStatus,
    /// Date the invoice was raised
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Set if and only if the invoice is `Paid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Month names this invoice covers
    pub months: Vec<String>,
}

impl Invoice {
    /// Creates a `Due` invoice for a student's month with no line items
    pub fn new(student: &Student, invoice_date: NaiveDate, due_date: NaiveDate) -> Self {
        let month = BillingMonth::of(invoice_date);

        Self {
            id: InvoiceId::for_month(&student.id, month),
            student_id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            whatsapp_number: student.whatsapp_number.clone(),
            activities: Vec::new(),
            admission_fee: None,
            discount: None,
            tax: None,
            status: InvoiceStatus::Due,
            invoice_date,
            due_date,
            payment_date: None,
            months: vec![month.name().to_string()],
        }
    }

    /// Appends a line item
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// Sets the admission fee
    pub fn with_admission_fee(mut self, fee: Decimal) -> Self {
        self.admission_fee = Some(fee);
        self
    }

    /// Sets the discount
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets the tax percentage
    pub fn with_tax(mut self, tax_percent: Decimal) -> Self {
        self.tax = Some(tax_percent);
        self
    }

    /// Assigns a status directly, as synthesis does
    ///
    /// Bypasses the lifecycle; keeps `payment_date` present only for `Paid`.
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self.payment_date = match status {
            InvoiceStatus::Paid => Some(self.invoice_date),
            _ => None,
        };
        self
    }

    /// The billing month this invoice was raised for
    pub fn billing_month(&self) -> BillingMonth {
        BillingMonth::of(self.invoice_date)
    }

    /// Final payable amount
    pub fn total(&self) -> Decimal {
        calculate_total(self)
    }

    pub fn is_outstanding(&self) -> bool {
        self.status.is_outstanding()
    }

    /// Records payment on `payment_date`
    pub fn mark_paid(&mut self, payment_date: NaiveDate) -> Result<(), BillingError> {
        self.status = self.status.transition(InvoiceStatus::Paid)?;
        self.payment_date = Some(payment_date);
        Ok(())
    }

    /// Flags a due invoice as overdue
    pub fn mark_overdue(&mut self) -> Result<(), BillingError> {
        self.status = self.status.transition(InvoiceStatus::Overdue)?;
        self.payment_date = None;
        Ok(())
    }

    /// Returns true if the invoice is `Due` and its due date has passed
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Due && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student() -> Student {
        Student::new("VIN-0001", "Ananya Rao", "bharatanatyam", date(2023, 6, 5))
            .with_email("ananya.rao@example.com")
    }

    #[test]
    fn test_new_invoice_copies_student() {
        let invoice = Invoice::new(&student(), date(2024, 7, 15), date(2024, 7, 30));

        assert_eq!(invoice.id.as_str(), "VIN-0001-202407");
        assert_eq!(invoice.name, "Ananya Rao");
        assert_eq!(invoice.email.as_deref(), Some("ananya.rao@example.com"));
        assert_eq!(invoice.months, vec!["July".to_string()]);
        assert_eq!(invoice.status, InvoiceStatus::Due);
        assert!(invoice.payment_date.is_none());
    }

    #[test]
    fn test_tuition_activity_description() {
        let activity = Activity::tuition("Yoga", "July", dec!(1800));

        assert_eq!(activity.name, TUITION_FEE);
        assert_eq!(
            activity.description.as_deref(),
            Some("Tuition Fee for Yoga for the month of July")
        );
        assert_eq!(activity.fee, dec!(1800));
    }

    #[test]
    fn test_mark_paid_sets_payment_date() {
        let mut invoice = Invoice::new(&student(), date(2024, 7, 15), date(2024, 7, 30));
        invoice.mark_paid(date(2024, 7, 20)).unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.payment_date, Some(date(2024, 7, 20)));

        let again = invoice.mark_paid(date(2024, 7, 21));
        assert!(again.is_err());
        assert_eq!(invoice.payment_date, Some(date(2024, 7, 20)));
    }

    #[test]
    fn test_overdue_then_paid() {
        let mut invoice = Invoice::new(&student(), date(2024, 7, 15), date(2024, 7, 30));
        assert!(invoice.is_past_due(date(2024, 8, 1)));
        assert!(!invoice.is_past_due(date(2024, 7, 30)));

        invoice.mark_overdue().unwrap();
        assert!(invoice.is_outstanding());
        assert!(!invoice.is_past_due(date(2024, 8, 1)));

        invoice.mark_paid(date(2024, 8, 2)).unwrap();
        assert!(!invoice.is_outstanding());
    }

    #[test]
    fn test_with_status_keeps_payment_date_invariant() {
        let invoice = Invoice::new(&student(), date(2024, 5, 15), date(2024, 5, 30))
            .with_status(InvoiceStatus::Paid);
        assert_eq!(invoice.payment_date, Some(date(2024, 5, 15)));

        let invoice = invoice.with_status(InvoiceStatus::Overdue);
        assert!(invoice.payment_date.is_none());
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let student = Student::new("VIN-0002", "Kabir", "yoga", date(2024, 1, 1));
        let invoice = Invoice::new(&student, date(2024, 7, 15), date(2024, 7, 30));
        let json = serde_json::to_value(&invoice).unwrap();

        assert!(json.get("discount").is_none());
        assert!(json.get("payment_date").is_none());
        assert_eq!(json["status"], "Due");
        assert_eq!(json["id"], "VIN-0002-202407");
    }
}
