//! Student Domain
//!
//! This crate owns the academy's student records and the port through which
//! other domains read them.
//!
//! - `student`: the `Student` entity and its validation rules
//! - `ports`: the `StudentSource` trait consumed by billing
//! - `roster`: an in-memory `StudentSource` with optional simulated latency

pub mod student;
pub mod error;
pub mod ports;
pub mod roster;

pub use student::{Student, StudentStatus};
pub use error::StudentError;
pub use ports::StudentSource;
pub use roster::InMemoryStudentRoster;
