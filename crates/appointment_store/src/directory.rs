//! Email-keyed user resolution.

use std::sync::Arc;

use entities::User;
use tracing::{debug, info};

use crate::{validate::validate_contact, SchedulingBackend, StoreResult};

/// Resolves contact emails to users, creating them on first sight.
///
/// Repeat lookups with a different name refresh the stored display name; the
/// id and email of an existing user never change.
pub struct UserDirectory<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for UserDirectory<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: SchedulingBackend + ?Sized> UserDirectory<B> {
    /// Creates a directory over a shared backend.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Returns the user registered under `email`, creating one if needed.
    ///
    /// Concurrent first-time callers for the same email all receive the same
    /// record: creation goes through the backend's upsert, never a plain
    /// insert.
    pub async fn find_or_create(&self, email: &str, name: &str) -> StoreResult<User> {
        let email = email.trim();
        let name = name.trim();
        validate_contact(&entities::Contact::new(name, email))?;

        if let Some(existing) = self.backend.find_user_by_email(email).await? {
            if existing.name == name {
                debug!(user_id = %existing.id, "Resolved existing user");
                return Ok(existing);
            }

            let refreshed = User {
                name: name.to_string(),
                ..existing
            };
            let user = self.backend.upsert_user(&refreshed).await?;
            info!(user_id = %user.id, "Refreshed user display name");
            return Ok(user);
        }

        let user = self.backend.upsert_user(&User::new(email, name)).await?;
        info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    /// Looks up a user by email without creating one.
    pub async fn find(&self, email: &str) -> StoreResult<Option<User>> {
        self.backend.find_user_by_email(email.trim()).await
    }
}
