//! Collection summaries for the accounts and reports pages

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use core_kernel::{BillingMonth, Currency, Money};

use crate::invoice::Invoice;
use crate::status::InvoiceStatus;

/// Billed and collected amounts for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCollection {
    pub month: BillingMonth,
    pub invoices: usize,
    pub billed: Money,
    pub collected: Money,
}

/// Aggregate view over an invoice list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingSummary {
    pub invoice_count: usize,
    pub paid_count: usize,
    pub due_count: usize,
    pub overdue_count: usize,
    /// Sum of all invoice totals
    pub billed: Money,
    /// Sum of `Paid` totals
    pub collected: Money,
    /// Sum of `Due` and `Overdue` totals
    pub outstanding: Money,
    /// Sum of `Overdue` totals
    pub overdue: Money,
    /// Most recent month first
    pub by_month: Vec<MonthlyCollection>,
}

impl BillingSummary {
    /// Summarizes invoices, treating every amount as `currency`
    pub fn from_invoices(invoices: &[Invoice], currency: Currency) -> Self {
        let zero = Money::zero(currency);
        let mut summary = Self {
            invoice_count: invoices.len(),
            paid_count: 0,
            due_count: 0,
            overdue_count: 0,
            billed: zero,
            collected: zero,
            outstanding: zero,
            overdue: zero,
            by_month: Vec::new(),
        };
        let mut months: BTreeMap<BillingMonth, MonthlyCollection> = BTreeMap::new();

        for invoice in invoices {
            let total = invoice.total();
            summary.billed = summary.billed.plus(total);

            let month = months
                .entry(invoice.billing_month())
                .or_insert_with(|| MonthlyCollection {
                    month: invoice.billing_month(),
                    invoices: 0,
                    billed: zero,
                    collected: zero,
                });
            month.invoices += 1;
            month.billed = month.billed.plus(total);

            match invoice.status {
                InvoiceStatus::Paid => {
                    summary.paid_count += 1;
                    summary.collected = summary.collected.plus(total);
                    month.collected = month.collected.plus(total);
                }
                InvoiceStatus::Due => {
                    summary.due_count += 1;
                    summary.outstanding = summary.outstanding.plus(total);
                }
                InvoiceStatus::Overdue => {
                    summary.overdue_count += 1;
                    summary.outstanding = summary.outstanding.plus(total);
                    summary.overdue = summary.overdue.plus(total);
                }
            }
        }

        summary.by_month = months.into_values().rev().collect();
        summary
    }

    /// Share of billed amount collected, as a percentage; zero when nothing was billed
    pub fn collection_rate(&self) -> rust_decimal::Decimal {
        if self.billed.is_zero() {
            return rust_decimal::Decimal::ZERO;
        }
        let ratio = self.collected.amount() / self.billed.amount();
        (ratio * rust_decimal::Decimal::ONE_HUNDRED).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_student::Student;
    use rust_decimal_macros::dec;

    use crate::invoice::Activity;

    fn invoice(
        student: &str,
        y: i32,
        m: u32,
        fee: rust_decimal::Decimal,
        status: InvoiceStatus,
    ) -> Invoice {
        let date = NaiveDate::from_ymd_opt(y, m, 15).unwrap();
        let student = Student::new(student, "Summary Student", "yoga", date);
        let mut invoice = Invoice::new(&student, date, date).with_status(status);
        invoice.add_activity(Activity::new("Tuition Fee", fee));
        invoice
    }

    #[test]
    fn test_empty_summary() {
        let summary = BillingSummary::from_invoices(&[], Currency::INR);
        assert_eq!(summary.invoice_count, 0);
        assert!(summary.billed.is_zero());
        assert!(summary.by_month.is_empty());
        assert_eq!(summary.collection_rate(), dec!(0));
    }

    #[test]
    fn test_totals_by_status() {
        let invoices = vec![
            invoice("VIN-0001", 2024, 7, dec!(1800), InvoiceStatus::Due),
            invoice("VIN-0001", 2024, 6, dec!(1800), InvoiceStatus::Overdue),
            invoice("VIN-0001", 2024, 5, dec!(1800), InvoiceStatus::Paid),
            invoice("VIN-0002", 2024, 7, dec!(2500), InvoiceStatus::Due),
            invoice("VIN-0002", 2024, 6, dec!(2500), InvoiceStatus::Paid),
        ];
        let summary = BillingSummary::from_invoices(&invoices, Currency::INR);

        assert_eq!(summary.invoice_count, 5);
        assert_eq!((summary.paid_count, summary.due_count, summary.overdue_count), (2, 2, 1));
        assert_eq!(summary.billed.amount(), dec!(10400));
        assert_eq!(summary.collected.amount(), dec!(4300));
        assert_eq!(summary.outstanding.amount(), dec!(6100));
        assert_eq!(summary.overdue.amount(), dec!(1800));
        assert_eq!(summary.collection_rate(), dec!(41.35));
    }

    #[test]
    fn test_by_month_most_recent_first() {
        let invoices = vec![
            invoice("VIN-0001", 2024, 1, dec!(100), InvoiceStatus::Paid),
            invoice("VIN-0001", 2023, 12, dec!(100), InvoiceStatus::Paid),
            invoice("VIN-0002", 2024, 1, dec!(200), InvoiceStatus::Due),
        ];
        let summary = BillingSummary::from_invoices(&invoices, Currency::INR);

        let months: Vec<String> = summary.by_month.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2024-01", "2023-12"]);
        assert_eq!(summary.by_month[0].invoices, 2);
        assert_eq!(summary.by_month[0].billed.amount(), dec!(300));
        assert_eq!(summary.by_month[0].collected.amount(), dec!(100));
    }
}
