//! Backend trait definitions.

use async_trait::async_trait;
use entities::{Appointment, User};
use uuid::Uuid;

use crate::StoreResult;

/// Storage capability shared by every backend.
///
/// Implementations must make `create_appointment` an atomic
/// check-and-insert: two overlapping appointments submitted concurrently can
/// never both succeed. Only an overlap may be reported as
/// [`crate::StoreError::Conflict`].
///
/// Cancellation is the caller's: dropping a returned future abandons the
/// underlying I/O, and deadlines are applied by wrapping the call.
#[async_trait]
pub trait SchedulingBackend: Send + Sync {
    // =========================================================================
    // Appointment operations
    // =========================================================================

    /// Inserts an appointment unless it overlaps an existing one.
    async fn create_appointment(&self, appointment: &Appointment) -> StoreResult<()>;

    /// Gets an appointment by ID.
    async fn get_appointment(&self, id: Uuid) -> StoreResult<Option<Appointment>>;

    /// Lists every appointment owned by a user, ordered by start time.
    async fn list_appointments_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Appointment>>;

    /// Deletes an appointment, returning whether a record was removed.
    async fn delete_appointment(&self, id: Uuid) -> StoreResult<bool>;

    // =========================================================================
    // User operations
    // =========================================================================

    /// Gets a user by email.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Inserts a user keyed by email.
    ///
    /// When a user with the same email already exists, its name is replaced
    /// and the stored record (with its original id) is returned.
    async fn upsert_user(&self, user: &User) -> StoreResult<User>;
}
