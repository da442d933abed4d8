//! Billing configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, Currency};

use crate::status::StatusHeuristic;

/// Tunables for invoice synthesis
///
/// Every field has a default so a partial configuration source is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Number of months synthesized per student, current month included
    pub window_months: u32,
    /// Days between the invoice date and its due date
    pub due_after_days: u32,
    /// Fee billed for courses missing from the fee schedule
    pub default_tuition_fee: Decimal,
    /// Currency used for summaries
    pub currency: Currency,
    /// How synthesized statuses measure months back
    pub status_heuristic: StatusHeuristic,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            window_months: 7,
            due_after_days: 15,
            default_tuition_fee: dec!(2000),
            currency: Currency::INR,
            status_heuristic: StatusHeuristic::ElapsedMonths,
        }
    }
}

impl BillingConfig {
    /// Rejects values synthesis cannot work with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.window_months == 0 {
            return Err(CoreError::configuration("window_months must be at least 1"));
        }
        if self.window_months > 120 {
            return Err(CoreError::configuration("window_months must not exceed 120"));
        }
        if self.default_tuition_fee.is_sign_negative() {
            return Err(CoreError::configuration("default_tuition_fee must not be negative"));
        }
        Ok(())
    }
}
