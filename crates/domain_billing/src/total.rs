//! Invoice totals
//!
//! `total = (Σ fees + admission − discount) × (1 + tax / 100)`
//!
//! Nothing is rounded or validated here. A discount larger than the
//! subtotal produces a negative total; display code formats the result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Rate;

use crate::invoice::Invoice;

/// Every intermediate amount of an invoice total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalBreakdown {
    /// Sum of all line item fees
    pub activities_total: Decimal,
    /// Line items plus admission fee
    pub subtotal: Decimal,
    /// Discount applied (zero if none)
    pub discount: Decimal,
    pub subtotal_after_discount: Decimal,
    /// Tax on the discounted subtotal (zero if no tax)
    pub tax_amount: Decimal,
    /// Final payable amount
    pub total: Decimal,
}

impl TotalBreakdown {
    /// Computes the breakdown for an invoice
    pub fn of(invoice: &Invoice) -> Self {
        let activities_total: Decimal = invoice.activities.iter().map(|a| a.fee).sum();
        let subtotal = activities_total + invoice.admission_fee.unwrap_or(Decimal::ZERO);
        let discount = invoice.discount.unwrap_or(Decimal::ZERO);
        let subtotal_after_discount = subtotal - discount;
        let tax_amount = invoice
            .tax
            .map(|pct| Rate::from_percentage(pct).of(subtotal_after_discount))
            .unwrap_or(Decimal::ZERO);

        Self {
            activities_total,
            subtotal,
            discount,
            subtotal_after_discount,
            tax_amount,
            total: subtotal_after_discount + tax_amount,
        }
    }
}

/// Final payable amount of an invoice
pub fn calculate_total(invoice: &Invoice) -> Decimal {
    TotalBreakdown::of(invoice).total
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use domain_student::Student;
    use proptest::prelude::*;

    use crate::invoice::Activity;

    proptest! {
        #[test]
        fn total_matches_closed_form(
            fees in proptest::collection::vec(0i64..1_000_000i64, 0..6),
            admission in proptest::option::of(0i64..500_000i64),
            discount in proptest::option::of(0i64..2_000_000i64),
            tax in proptest::option::of(0i64..3_000i64)
        ) {
            let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
            let student = Student::new("VIN-0001", "Prop Student", "yoga", date);
            let mut invoice = Invoice::new(&student, date, date);
            for fee in &fees {
                invoice.add_activity(Activity::new("Line", Decimal::new(*fee, 2)));
            }
            invoice.admission_fee = admission.map(|a| Decimal::new(a, 2));
            invoice.discount = discount.map(|d| Decimal::new(d, 2));
            invoice.tax = tax.map(|t| Decimal::new(t, 1));

            let fees_sum: Decimal = fees.iter().map(|f| Decimal::new(*f, 2)).sum();
            let base = fees_sum
                + invoice.admission_fee.unwrap_or_default()
                - invoice.discount.unwrap_or_default();
            let tax_factor = Decimal::ONE + invoice.tax.unwrap_or_default() / Decimal::ONE_HUNDRED;
            let expected = base * tax_factor;

            prop_assert_eq!(calculate_total(&invoice), expected);
        }
    }
}
