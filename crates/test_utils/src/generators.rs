//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use domain_billing::StatusHeuristic;
use domain_student::Student;
use proptest::prelude::*;

/// Strategy for calendar dates between 2000 and 2099
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100i32, 1u32..=12u32, 1u32..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

pub fn heuristic_strategy() -> impl Strategy<Value = StatusHeuristic> {
    prop_oneof![
        Just(StatusHeuristic::ElapsedMonths),
        Just(StatusHeuristic::CalendarMonthIndex),
    ]
}

/// Strategy for course codes, some listed in the academy schedule and some not
pub fn course_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("yoga".to_string()),
        Just("kathak".to_string()),
        Just("veena".to_string()),
        Just("carnatic-vocal".to_string()),
        "[a-z]{3,8}(-[a-z]{3,8})?",
    ]
}

/// Strategy for a roster of distinct students
pub fn roster_strategy(max_len: usize) -> impl Strategy<Value = Vec<Student>> {
    prop::collection::vec((course_strategy(), date_strategy()), 0..=max_len).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (course, joined))| {
                let n = i + 1;
                Student::new(format!("VIN-{:04}", n), format!("Student {}", n), course, joined)
            })
            .collect()
    })
}
