//! User-related entity definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person who has booked at least one appointment.
///
/// Users are keyed by email; the store guarantees one record per address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address (unique across users).
    pub email: String,
}

impl User {
    /// Creates a new user with a freshly generated identifier.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Contact details captured at booking time.
///
/// Stored on the appointment as a copy; it does not follow later changes to
/// the owning [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("test@example.com", "Test User");

        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, "Test User");
        assert_ne!(user.id, User::new("test@example.com", "Test User").id);
    }
}
