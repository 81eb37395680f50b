//! Appointment store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use entities::{Appointment, Contact};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    validate::validate_appointment, SchedulingBackend, StoreError, StoreResult, UserDirectory,
};

/// Everything needed to book a slot for a contact who may not be a user yet.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub contact: Contact,
    pub title: Option<String>,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub date: Option<DateTime<Utc>>,
}

impl BookingRequest {
    pub fn new(contact: Contact, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            contact,
            title: None,
            description: String::new(),
            start_time,
            end_time,
            date: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Owns appointment CRUD and the no-double-booking rule.
///
/// Overlap is evaluated across all appointments, not per user.
pub struct SchedulingStore<B: ?Sized> {
    backend: Arc<B>,
    users: UserDirectory<B>,
}

impl<B: ?Sized> Clone for SchedulingStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            users: self.users.clone(),
        }
    }
}

impl<B: SchedulingBackend> SchedulingStore<B> {
    /// Creates a store that takes ownership of `backend`.
    pub fn new(backend: B) -> Self {
        Self::from_shared(Arc::new(backend))
    }
}

impl<B: SchedulingBackend + ?Sized> SchedulingStore<B> {
    /// Creates a store over a backend that is shared with other components.
    pub fn from_shared(backend: Arc<B>) -> Self {
        let users = UserDirectory::new(Arc::clone(&backend));
        Self { backend, users }
    }

    /// The user directory backed by the same storage.
    pub fn users(&self) -> &UserDirectory<B> {
        &self.users
    }

    /// Persists an appointment if its slot is free.
    ///
    /// Returns [`StoreError::Conflict`] when the slot intersects any stored
    /// appointment. The caller should not retry the same request.
    pub async fn create(&self, appointment: Appointment) -> StoreResult<Appointment> {
        validate_appointment(&appointment)?;
        self.insert(appointment).await
    }

    /// Resolves the contact to a user and books the slot for them.
    ///
    /// The request is validated before the user is resolved, so a rejected
    /// booking never creates a user.
    pub async fn book(&self, request: BookingRequest) -> StoreResult<Appointment> {
        let contact = Contact::new(request.contact.name.trim(), request.contact.email.trim());
        let mut appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            title: request.title,
            description: request.description,
            contact,
            start_time: request.start_time,
            end_time: request.end_time,
            date: request.date,
        };
        validate_appointment(&appointment)?;

        let user = self
            .users
            .find_or_create(&appointment.contact.email, &appointment.contact.name)
            .await?;
        appointment.user_id = user.id;

        self.insert(appointment).await
    }

    async fn insert(&self, appointment: Appointment) -> StoreResult<Appointment> {
        match self.backend.create_appointment(&appointment).await {
            Ok(()) => {
                info!(
                    appointment_id = %appointment.id,
                    user_id = %appointment.user_id,
                    start_time = %appointment.start_time,
                    end_time = %appointment.end_time,
                    "Appointment created"
                );
                Ok(appointment)
            }
            Err(err @ StoreError::Conflict(_)) => {
                warn!(
                    user_id = %appointment.user_id,
                    start_time = %appointment.start_time,
                    end_time = %appointment.end_time,
                    "Rejected overlapping appointment"
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Gets an appointment by ID.
    pub async fn get(&self, id: Uuid) -> StoreResult<Appointment> {
        self.backend
            .get_appointment(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Appointment", id.to_string()))
    }

    /// Lists a user's appointments ordered by start time.
    pub async fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Appointment>> {
        let appointments = self.backend.list_appointments_by_user(user_id).await?;
        debug!(user_id = %user_id, count = appointments.len(), "Listed appointments");
        Ok(appointments)
    }

    /// Deletes an appointment. Deleting an unknown id returns `false`.
    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let deleted = self.backend.delete_appointment(id).await?;
        if deleted {
            info!(appointment_id = %id, "Appointment deleted");
        } else {
            debug!(appointment_id = %id, "No appointment to delete");
        }
        Ok(deleted)
    }
}
