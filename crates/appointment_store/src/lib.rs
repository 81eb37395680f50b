//! Appointment scheduling store.
//!
//! This crate owns the booking invariants: no two stored appointments may
//! occupy overlapping `[start_time, end_time)` intervals, and every contact
//! email resolves to exactly one user. The invariants hold over every
//! [`SchedulingBackend`]:
//!
//! - [`PostgresBackend`] relies on an exclusion constraint in the database.
//! - [`SqliteBackend`] relies on an insert trigger and SQLite's single-writer
//!   locking.
//! - [`FileBackend`] keeps one JSON document and checks overlap inside a
//!   process-wide lock.

mod directory;
mod error;
mod file;
mod overlap;
mod postgres;
mod schema;
mod sqlite;
mod store;
mod traits;
mod validate;

pub use directory::*;
pub use error::*;
pub use file::*;
pub use overlap::*;
pub use postgres::*;
pub use sqlite::*;
pub use store::*;
pub use traits::*;
