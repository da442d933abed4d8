//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::StudentId;
use domain_billing::{Activity, Invoice, InvoiceStatus};
use domain_student::{Student, StudentStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::DateFixtures;

/// Builder for test students
pub struct StudentBuilder {
    id: StudentId,
    name: String,
    course: String,
    enrollment_date: NaiveDate,
    status: StudentStatus,
}

impl Default for StudentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: StudentId::new("VIN-0001"),
            name: "Test Student".to_string(),
            course: "yoga".to_string(),
            enrollment_date: DateFixtures::ymd(2023, 1, 1),
            status: StudentStatus::Enrolled,
        }
    }

    pub fn with_id(mut self, id: impl Into<StudentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = course.into();
        self
    }

    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the student
    pub fn build(self) -> Student {
        Student::new(self.id, self.name, self.course, self.enrollment_date).with_status(self.status)
    }
}

/// Builder for test invoices
///
/// Defaults to a single ₹1800 tuition line dated `mid_july_2024`,
/// due fifteen days later.
pub struct InvoiceBuilder {
    student: Student,
    invoice_date: NaiveDate,
    activities: Vec<Activity>,
    admission_fee: Option<Decimal>,
    discount: Option<Decimal>,
    tax: Option<Decimal>,
    status: InvoiceStatus,
    payment_date: Option<NaiveDate>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            student: StudentBuilder::new().build(),
            invoice_date: DateFixtures::mid_july_2024(),
            activities: vec![Activity::new("Tuition Fee", dec!(1800))],
            admission_fee: None,
            discount: None,
            tax: None,
            status: InvoiceStatus::Due,
            payment_date: None,
        }
    }

    pub fn for_student(mut self, student: Student) -> Self {
        self.student = student;
        self
    }

    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.invoice_date = date;
        self
    }

    pub fn with_admission_fee(mut self, fee: Decimal) -> Self {
        self.admission_fee = Some(fee);
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_tax(mut self, percent: Decimal) -> Self {
        self.tax = Some(percent);
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    /// Marks the invoice paid on `date`
    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.status = InvoiceStatus::Paid;
        self.payment_date = Some(date);
        self
    }

    /// Builds the invoice
    pub fn build(self) -> Invoice {
        let due_date = self.invoice_date + chrono::Duration::days(15);
        let mut invoice = Invoice::new(&self.student, self.invoice_date, due_date)
            .with_status(self.status);
        for activity in self.activities {
            invoice.add_activity(activity);
        }
        invoice.admission_fee = self.admission_fee;
        invoice.discount = self.discount;
        invoice.tax = self.tax;
        if invoice.status == InvoiceStatus::Paid {
            invoice.payment_date = self.payment_date.or(Some(self.invoice_date));
        }
        invoice
    }
}
