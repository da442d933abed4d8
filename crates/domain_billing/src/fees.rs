//! Monthly tuition fee schedule
//!
//! Course codes on the roster are free text entered at admission time, so
//! lookups are trimmed and case-insensitive. Courses missing from the
//! schedule bill the flat default fee.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A course and its monthly tuition fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseFee {
    /// Course code as used on the roster, lowercase
    pub code: String,
    /// Display name used in invoice descriptions
    pub display_name: String,
    pub monthly_fee: Decimal,
}

impl CourseFee {
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        monthly_fee: Decimal,
    ) -> Self {
        Self {
            code: normalize(&code.into()),
            display_name: display_name.into(),
            monthly_fee,
        }
    }
}

/// The fee that applies to one student's course
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFee {
    pub course_name: String,
    pub monthly_fee: Decimal,
    /// False when the course was not on the schedule and the default applied
    pub listed: bool,
}

/// Course code to monthly fee table
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    courses: HashMap<String, CourseFee>,
    default_fee: Decimal,
}

impl FeeSchedule {
    /// Creates an empty schedule where every course bills `default_fee`
    pub fn new(default_fee: Decimal) -> Self {
        Self {
            courses: HashMap::new(),
            default_fee,
        }
    }

    /// Adds or replaces a course
    pub fn with_course(mut self, course: CourseFee) -> Self {
        self.courses.insert(course.code.clone(), course);
        self
    }

    /// The academy's standard course list
    pub fn academy_default(default_fee: Decimal) -> Self {
        [
            ("bharatanatyam", "Bharatanatyam", dec!(2500)),
            ("kathak", "Kathak", dec!(2500)),
            ("kuchipudi", "Kuchipudi", dec!(2500)),
            ("carnatic-vocal", "Carnatic Vocal", dec!(2000)),
            ("hindustani-vocal", "Hindustani Vocal", dec!(2000)),
            ("veena", "Veena", dec!(2200)),
            ("violin", "Violin", dec!(2200)),
            ("mridangam", "Mridangam", dec!(2000)),
            ("flute", "Flute", dec!(2000)),
            ("yoga", "Yoga", dec!(1800)),
        ]
        .into_iter()
        .fold(Self::new(default_fee), |schedule, (code, name, fee)| {
            schedule.with_course(CourseFee::new(code, name, fee))
        })
    }

    pub fn default_fee(&self) -> Decimal {
        self.default_fee
    }

    /// Looks up a course by code
    pub fn course(&self, code: &str) -> Option<&CourseFee> {
        self.courses.get(&normalize(code))
    }

    /// Resolves the fee and display name for a roster course code
    pub fn resolve(&self, code: &str) -> ResolvedFee {
        match self.course(code) {
            Some(course) => ResolvedFee {
                course_name: course.display_name.clone(),
                monthly_fee: course.monthly_fee,
                listed: true,
            },
            None => ResolvedFee {
                course_name: title_case(code),
                monthly_fee: self.default_fee,
                listed: false,
            },
        }
    }

    /// All courses, sorted by code
    pub fn courses(&self) -> Vec<&CourseFee> {
        let mut courses: Vec<&CourseFee> = self.courses.values().collect();
        courses.sort_by(|a, b| a.code.cmp(&b.code));
        courses
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

/// `western-guitar` -> `Western Guitar`
fn title_case(code: &str) -> String {
    code.trim()
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
