//! Appointment entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Contact, TimeSpan};

/// A booked time slot.
///
/// `user_id` is a plain reference to a [`crate::User`]; the appointment does
/// not own the user and removing one never touches the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Optional short title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Contact details as given when booking.
    #[serde(rename = "contact_information")]
    pub contact: Contact,
    /// Inclusive start of the slot.
    pub start_time: DateTime<Utc>,
    /// Exclusive end of the slot.
    pub end_time: DateTime<Utc>,
    /// Calendar date the appointment was filed under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Creates a new appointment with a freshly generated identifier.
    pub fn new(
        user_id: Uuid,
        contact: Contact,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: None,
            description: String::new(),
            contact,
            start_time,
            end_time,
            date: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the calendar date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// The `[start_time, end_time)` interval this appointment occupies.
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_time, self.end_time)
    }
}
