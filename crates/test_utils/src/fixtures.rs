//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the billing system. These fixtures
//! are consistent and predictable so expected invoice counts, ids and
//! statuses can be written down in tests.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::FixedClock;
use domain_billing::{BillingConfig, BillingService, InMemoryBillingStore, InvoiceSynthesizer};
use domain_student::{InMemoryStudentRoster, Student};

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// Mid-July 2024, the reference "today" for most tests
    pub fn mid_july_2024() -> NaiveDate {
        Self::ymd(2024, 7, 15)
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }
}

/// Fixture for students
pub struct StudentFixtures;

impl StudentFixtures {
    /// An enrolled yoga student with full contact details
    pub fn yoga_student() -> Student {
        Student::new("VIN-0101", "Lakshmi Narayan", "yoga", DateFixtures::ymd(2023, 4, 1))
            .with_email("lakshmi.narayan@example.com")
            .with_whatsapp("919876543210")
    }

    /// A bharatanatyam student with no contact details
    pub fn dance_student() -> Student {
        Student::new("VIN-0102", "Aditi Varma", "bharatanatyam", DateFixtures::ymd(2023, 5, 2))
    }

    /// `count` students with sequential ids and rotating courses
    pub fn many(count: usize) -> Vec<Student> {
        const COURSES: [&str; 4] = ["yoga", "kathak", "violin", "flute"];
        (0..count)
            .map(|i| {
                Student::new(
                    format!("VIN-{:04}", 200 + i),
                    format!("Student {}", i + 1),
                    COURSES[i % COURSES.len()],
                    DateFixtures::ymd(2023, 1, 1),
                )
            })
            .collect()
    }
}

/// Fixture for billing components
pub struct BillingFixtures;

impl BillingFixtures {
    /// Synthesizer with default settings and a clock at `mid_july_2024`
    pub fn synthesizer() -> InvoiceSynthesizer {
        Self::synthesizer_at(DateFixtures::mid_july_2024())
    }

    /// Synthesizer with default settings and a clock at `today`
    pub fn synthesizer_at(today: NaiveDate) -> InvoiceSynthesizer {
        InvoiceSynthesizer::new(&BillingConfig::default(), Arc::new(FixedClock::new(today)))
            .expect("default billing config is valid")
    }

    /// A service over `roster` with a fresh store and a clock at `mid_july_2024`
    pub fn service(roster: Arc<InMemoryStudentRoster>) -> BillingService {
        BillingService::new(roster, Arc::new(InMemoryBillingStore::new()), Self::synthesizer())
    }
}
