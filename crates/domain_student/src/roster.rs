//! In-memory student roster
//!
//! Serves the student list from process memory. An optional artificial
//! delay stands in for the latency of a real registry, and the roster can be
//! switched offline to exercise failure handling in its consumers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, StudentId,
};

use crate::error::StudentError;
use crate::ports::StudentSource;
use crate::student::{Student, StudentStatus};

const ADAPTER_ID: &str = "in-memory-student-roster";

/// Student list held in memory
#[derive(Debug, Default)]
pub struct InMemoryStudentRoster {
    students: RwLock<Vec<Student>>,
    latency: Duration,
    offline: AtomicBool,
}

impl InMemoryStudentRoster {
    /// Creates an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster holding the given students in order
    ///
    /// Students are taken as-is; use `enrol` to validate new admissions.
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students: RwLock::new(students),
            ..Self::default()
        }
    }

    /// Delays every listing by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Adds a validated student at the end of the roster
    pub async fn enrol(&self, student: Student) -> Result<(), StudentError> {
        student.check()?;

        let mut students = self.students.write().await;
        if students.iter().any(|s| s.id == student.id) {
            return Err(StudentError::DuplicateStudent(student.id.to_string()));
        }

        debug!(student_id = %student.id, course = %student.desired_course, "Student enrolled");
        students.push(student);
        Ok(())
    }

    /// Changes a student's enrolment status
    pub async fn set_status(
        &self,
        id: &StudentId,
        status: StudentStatus,
    ) -> Result<(), StudentError> {
        let mut students = self.students.write().await;
        let student = students
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StudentError::StudentNotFound(id.to_string()))?;
        student.status = status;
        Ok(())
    }

    /// Number of students on the roster
    pub async fn len(&self) -> usize {
        self.students.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.students.read().await.is_empty()
    }

    /// Marks the roster unreachable (or reachable again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Demo roster used by the API server
    pub fn sample() -> Self {
        let joined = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        Self::with_students(vec![
            Student::new("VIN-0001", "Ananya Rao", "bharatanatyam", joined(2023, 6, 5))
                .with_email("ananya.rao@example.com")
                .with_whatsapp("919845012345"),
            Student::new("VIN-0002", "Kabir Menon", "carnatic-vocal", joined(2023, 7, 12))
                .with_email("kabir.menon@example.com"),
            Student::new("VIN-0003", "Meera Iyer", "veena", joined(2023, 8, 1))
                .with_whatsapp("919900112233"),
            Student::new("VIN-0004", "Rohan Das", "mridangam", joined(2023, 9, 18))
                .with_email("rohan.das@example.com"),
            Student::new("VIN-0005", "Ishita Sharma", "kathak", joined(2024, 1, 8))
                .with_email("ishita.sharma@example.com")
                .with_whatsapp("919811223344"),
            Student::new("VIN-0006", "Arjun Pillai", "yoga", joined(2024, 2, 20)),
            Student::new("VIN-0007", "Diya Kulkarni", "hindustani-vocal", joined(2024, 3, 3))
                .with_email("diya.kulkarni@example.com"),
            Student::new("VIN-0008", "Vihaan Joshi", "western-guitar", joined(2024, 4, 15))
                .with_status(StudentStatus::OnBreak),
        ])
    }

    fn ensure_online(&self) -> Result<(), PortError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PortError::ServiceUnavailable {
                service: ADAPTER_ID.to_string(),
            });
        }
        Ok(())
    }
}

impl DomainPort for InMemoryStudentRoster {}

#[async_trait]
impl StudentSource for InMemoryStudentRoster {
    async fn list_students(&self) -> Result<Vec<Student>, PortError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.ensure_online()?;

        let students = self.students.read().await.clone();
        debug!(count = students.len(), "Listed students");
        Ok(students)
    }
}

#[async_trait]
impl HealthCheckable for InMemoryStudentRoster {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let result = self.ensure_online();
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms)
                .with_status(AdapterHealth::Unhealthy, e.to_string()),
        }
    }
}
