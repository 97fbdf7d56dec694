//! Database Models
//!
//! Row types read back from SurrealDB projections and the write payloads
//! repositories accept. Conversion to the wire types lives here.

pub mod employee;
pub mod user;

// Re-exports
pub use employee::{EmployeeFields, EmployeeRow};
pub use user::{NewUser, UserRow};

use chrono::{DateTime, Utc};

/// Store timestamps are projected as `time::nano(..)`
pub(crate) fn from_nanos(nanos: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(nanos)
}
