//! Student Domain Ports
//!
//! Billing depends on a read-only listing of every enrolled student. The
//! `StudentSource` port keeps that dependency swappable: the in-memory
//! roster serves the demo, a registry-backed adapter can replace it.
//!
//! ```rust,ignore
//! pub struct BillingService {
//!     students: Arc<dyn StudentSource>,
//! }
//!
//! let students = self.students.list_students().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::student::Student;

/// Read-only source of the academy's student list
#[async_trait]
pub trait StudentSource: DomainPort + HealthCheckable {
    /// Lists every student, in roster order
    ///
    /// Callers treat the order as significant: invoice synthesis derives
    /// per-student heuristics from each student's position in this list.
    async fn list_students(&self) -> Result<Vec<Student>, PortError>;
}
