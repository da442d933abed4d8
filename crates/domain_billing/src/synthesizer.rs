//! Invoice synthesis
//!
//! Fabricates a rolling window of monthly tuition invoices for every
//! student. The output is fully determined by the roster, the fee schedule
//! and the clock's date; nothing about previously recorded payments is
//! consulted, so re-running synthesis resets every status.
//!
//! For each student (roster order) and each offset `i` in
//! `0..window_months` (most recent month first):
//!
//! 1. `invoice_date = today − i months`, clamped to the month's last day
//! 2. one "Tuition Fee" line at the course's monthly fee
//! 3. status from [`assign_status`]
//! 4. `due_date = invoice_date + due_after_days`
//! 5. `payment_date = invoice_date` when the status is `Paid`

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use core_kernel::temporal::{days_after, months_ago};
use core_kernel::{BillingMonth, Clock, CoreError};
use domain_student::Student;

use crate::config::BillingConfig;
use crate::error::SynthesisError;
use crate::fees::FeeSchedule;
use crate::invoice::{Activity, Invoice};
use crate::status::{assign_status, StatusHeuristic};

/// Builds the invoice list from a student roster
#[derive(Clone)]
pub struct InvoiceSynthesizer {
    fees: FeeSchedule,
    heuristic: StatusHeuristic,
    window_months: u32,
    due_after_days: u32,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InvoiceSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceSynthesizer")
            .field("heuristic", &self.heuristic)
            .field("window_months", &self.window_months)
            .field("due_after_days", &self.due_after_days)
            .field("today", &self.clock.today())
            .finish()
    }
}

impl InvoiceSynthesizer {
    /// Creates a synthesizer using the academy fee schedule
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` if `config` fails `BillingConfig::validate`,
    /// e.g. a zero-month window that would bill nobody.
    pub fn new(config: &BillingConfig, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            fees: FeeSchedule::academy_default(config.default_tuition_fee),
            heuristic: config.status_heuristic,
            window_months: config.window_months,
            due_after_days: config.due_after_days,
            clock,
        })
    }

    /// Replaces the fee schedule
    pub fn with_fee_schedule(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn window_months(&self) -> u32 {
        self.window_months
    }

    /// The clock's current date
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Synthesizes invoices for all students as of the clock's date
    pub fn synthesize(&self, students: &[Student]) -> Result<Vec<Invoice>, SynthesisError> {
        self.synthesize_at(students, self.clock.today())
    }

    /// Synthesizes invoices for all students as of `today`
    ///
    /// Returns `students.len() × window_months` invoices, student-major,
    /// most recent month first within each student.
    pub fn synthesize_at(
        &self,
        students: &[Student],
        today: NaiveDate,
    ) -> Result<Vec<Invoice>, SynthesisError> {
        let current_month = BillingMonth::of(today);
        let mut invoices = Vec::with_capacity(students.len() * self.window_months as usize);

        for (index, student) in students.iter().enumerate() {
            for offset in 0..self.window_months {
                invoices.push(self.invoice_for(index, student, today, current_month, offset)?);
            }
        }

        info!(
            students = students.len(),
            invoices = invoices.len(),
            month = %current_month,
            "Synthesized tuition invoices"
        );
        Ok(invoices)
    }

    fn invoice_for(
        &self,
        index: usize,
        student: &Student,
        today: NaiveDate,
        current_month: BillingMonth,
        offset: u32,
    ) -> Result<Invoice, SynthesisError> {
        let out_of_range = || SynthesisError::DateOutOfRange {
            student_id: student.id.to_string(),
            offset,
        };

        let invoice_date = months_ago(today, offset).map_err(|_| out_of_range())?;
        let due_date = days_after(invoice_date, self.due_after_days).map_err(|_| out_of_range())?;
        let month = BillingMonth::of(invoice_date);

        let fee = self.fees.resolve(&student.desired_course);
        if !fee.listed && offset == 0 {
            debug!(
                student_id = %student.id,
                course = %student.desired_course,
                "Course not on fee schedule, billing default fee"
            );
        }

        let status = assign_status(self.heuristic, index, month, current_month);

        let mut invoice = Invoice::new(student, invoice_date, due_date).with_status(status);
        invoice.add_activity(Activity::tuition(&fee.course_name, month.name(), fee.monthly_fee));

        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::FixedClock;
    use rust_decimal_macros::dec;

    use crate::status::InvoiceStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn synthesizer_on(today: NaiveDate) -> InvoiceSynthesizer {
        InvoiceSynthesizer::new(&BillingConfig::default(), Arc::new(FixedClock::new(today)))
            .unwrap()
    }

    fn yoga_student() -> Student {
        Student::new("VIN-0001", "Arjun Pillai", "yoga", date(2024, 1, 1))
    }

    #[test]
    fn test_single_yoga_student_in_july() {
        let invoices = synthesizer_on(date(2024, 7, 15))
            .synthesize(&[yoga_student()])
            .unwrap();

        assert_eq!(invoices.len(), 7);
        let ids: Vec<&str> = invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "VIN-0001-202407",
                "VIN-0001-202406",
                "VIN-0001-202405",
                "VIN-0001-202404",
                "VIN-0001-202403",
                "VIN-0001-202402",
                "VIN-0001-202401",
            ]
        );

        let july = &invoices[0];
        assert_eq!(july.status, InvoiceStatus::Due);
        assert_eq!(july.due_date, date(2024, 7, 30));
        assert!(july.payment_date.is_none());
        assert_eq!(july.activities.len(), 1);
        assert_eq!(july.activities[0].name, "Tuition Fee");
        assert_eq!(july.activities[0].fee, dec!(1800));
        assert_eq!(
            july.activities[0].description.as_deref(),
            Some("Tuition Fee for Yoga for the month of July")
        );
    }

    #[test]
    fn test_statuses_for_first_student() {
        let invoices = synthesizer_on(date(2024, 7, 15))
            .synthesize(&[yoga_student()])
            .unwrap();
        let statuses: Vec<InvoiceStatus> = invoices.iter().map(|i| i.status).collect();

        assert_eq!(
            statuses,
            vec![
                InvoiceStatus::Due,
                InvoiceStatus::Overdue,
                InvoiceStatus::Overdue,
                InvoiceStatus::Paid,
                InvoiceStatus::Paid,
                InvoiceStatus::Paid,
                InvoiceStatus::Paid,
            ]
        );
        assert_eq!(invoices[3].payment_date, Some(date(2024, 4, 15)));
    }

    #[test]
    fn test_end_of_month_dates_clamp() {
        let invoices = synthesizer_on(date(2024, 3, 31))
            .synthesize(&[yoga_student()])
            .unwrap();

        assert_eq!(invoices[1].invoice_date, date(2024, 2, 29));
        assert_eq!(invoices[1].id.as_str(), "VIN-0001-202402");
        assert_eq!(invoices[1].due_date, date(2024, 3, 15));
        assert_eq!(invoices[1].months, vec!["February".to_string()]);
    }

    #[test]
    fn test_empty_roster_gives_empty_list() {
        let invoices = synthesizer_on(date(2024, 7, 15)).synthesize(&[]).unwrap();
        assert!(invoices.is_empty());
    }

    #[test]
    fn test_window_is_configurable() {
        let config = BillingConfig {
            window_months: 3,
            due_after_days: 10,
            ..BillingConfig::default()
        };
        let clock = Arc::new(FixedClock::new(date(2024, 7, 15)));
        let synthesizer = InvoiceSynthesizer::new(&config, clock).unwrap();
        let invoices = synthesizer.synthesize(&[yoga_student()]).unwrap();

        assert_eq!(invoices.len(), 3);
        assert_eq!(invoices[0].due_date, date(2024, 7, 25));
    }

    #[test]
    fn test_empty_window_rejected_at_construction() {
        let config = BillingConfig {
            window_months: 0,
            ..BillingConfig::default()
        };
        let result = InvoiceSynthesizer::new(&config, Arc::new(FixedClock::new(date(2024, 7, 15))));

        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_synthesize_at_overrides_clock() {
        let synthesizer = synthesizer_on(date(2024, 7, 15));
        let invoices = synthesizer.synthesize_at(&[yoga_student()], date(2025, 1, 10)).unwrap();

        assert_eq!(invoices[0].id.as_str(), "VIN-0001-202501");
        assert_eq!(invoices[1].id.as_str(), "VIN-0001-202412");
    }
}
