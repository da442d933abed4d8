//! Calendar handling for monthly billing
//!
//! This module provides:
//! - `BillingMonth`: a calendar month that an invoice covers
//! - `Clock`: an injectable source of "today"
//! - month arithmetic helpers with end-of-month clamping

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid month number: {0}")]
    InvalidMonth(u32),

    #[error("Invalid billing month '{0}', expected yyyyMM or yyyy-MM")]
    InvalidFormat(String),

    #[error("Date arithmetic out of range")]
    OutOfRange,
}

/// A calendar month identified by year and month number (1-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BillingMonth {
    year: i32,
    month: u32,
}

impl BillingMonth {
    /// Creates a billing month, rejecting month numbers outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based month-of-year index, 0-11
    pub fn index0(&self) -> u32 {
        self.month - 1
    }

    /// Compact form used in invoice identifiers, e.g. `202407`
    pub fn yyyymm(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Full English month name, e.g. `July`
    pub fn name(&self) -> &'static str {
        // month is validated to 1-12 at construction
        chrono::Month::try_from(self.month as u8)
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    /// The first calendar day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The month `n` months earlier, crossing year boundaries as needed
    pub fn months_before(&self, n: u32) -> Self {
        let ordinal = self.ordinal() - n as i64;
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Whole months elapsed from `earlier` to `self` (negative if `earlier` is later)
    pub fn elapsed_since(&self, earlier: BillingMonth) -> i64 {
        self.ordinal() - earlier.ordinal()
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingMonth {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| *c != '-').collect();
        if compact.len() != 6 || !compact.chars().all(|c| c.is_ascii_digit()) {
            return Err(TemporalError::InvalidFormat(s.to_string()));
        }

        let year = compact[..4]
            .parse()
            .map_err(|_| TemporalError::InvalidFormat(s.to_string()))?;
        let month = compact[4..]
            .parse()
            .map_err(|_| TemporalError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl Serialize for BillingMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BillingMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BillingMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Subtracts whole calendar months from a date
///
/// The day is clamped to the last day of the target month, so 31 March
/// minus one month is the last day of February.
pub fn months_ago(date: NaiveDate, months: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_sub_months(Months::new(months))
        .ok_or(TemporalError::OutOfRange)
}

/// Adds days to a date
pub fn days_after(date: NaiveDate, days: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_add_days(chrono::Days::new(days as u64))
        .ok_or(TemporalError::OutOfRange)
}

/// Source of the current date
///
/// Billing logic asks a clock instead of calling `Utc::now()` directly so
/// that synthesis is reproducible under test.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock frozen on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_billing_month_rejects_month_13() {
        assert_eq!(BillingMonth::new(2024, 13), Err(TemporalError::InvalidMonth(13)));
        assert_eq!(BillingMonth::new(2024, 0), Err(TemporalError::InvalidMonth(0)));
    }

    #[test]
    fn test_months_before_crosses_year() {
        let jan = BillingMonth::new(2025, 1).unwrap();
        assert_eq!(jan.months_before(1), BillingMonth::new(2024, 12).unwrap());
        assert_eq!(jan.months_before(13), BillingMonth::new(2023, 12).unwrap());
        assert_eq!(jan.months_before(0), jan);
    }

    #[test]
    fn test_elapsed_since() {
        let feb = BillingMonth::new(2025, 2).unwrap();
        let nov = BillingMonth::new(2024, 11).unwrap();
        assert_eq!(feb.elapsed_since(nov), 3);
        assert_eq!(nov.elapsed_since(feb), -3);
    }

    #[test]
    fn test_names_and_indices() {
        let july = BillingMonth::of(date(2024, 7, 15));
        assert_eq!(july.name(), "July");
        assert_eq!(july.index0(), 6);
        assert_eq!(july.yyyymm(), "202407");
        assert_eq!(july.to_string(), "2024-07");
    }

    #[test]
    fn test_parse_both_forms() {
        let expected = BillingMonth::new(2024, 3).unwrap();
        assert_eq!("202403".parse::<BillingMonth>().unwrap(), expected);
        assert_eq!("2024-03".parse::<BillingMonth>().unwrap(), expected);
        assert!("2024-3".parse::<BillingMonth>().is_err());
        assert!("March".parse::<BillingMonth>().is_err());
    }

    #[test]
    fn test_months_ago_clamps_to_month_end() {
        assert_eq!(months_ago(date(2024, 3, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(months_ago(date(2023, 3, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(months_ago(date(2024, 7, 15), 6).unwrap(), date(2024, 1, 15));
    }

    #[test]
    fn test_days_after_spans_month_end() {
        assert_eq!(days_after(date(2024, 2, 20), 15).unwrap(), date(2024, 3, 6));
        assert_eq!(days_after(date(2024, 7, 15), 15).unwrap(), date(2024, 7, 30));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(date(2024, 7, 15));
        assert_eq!(clock.today(), date(2024, 7, 15));
    }

    #[test]
    fn test_billing_month_serde() {
        let month = BillingMonth::new(2024, 7).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: BillingMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }
}
