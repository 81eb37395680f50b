//! Input checks applied before any backend is touched.

use chrono::{DateTime, Timelike, Utc};
use entities::{Appointment, Contact};

use crate::{StoreError, StoreResult};

pub(crate) fn validate_email(email: &str) -> StoreResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(StoreError::validation("email is required"));
    }
    if !email.contains('@') {
        return Err(StoreError::validation(format!(
            "email `{email}` is not an address"
        )));
    }
    Ok(())
}

pub(crate) fn validate_contact(contact: &Contact) -> StoreResult<()> {
    if contact.name.trim().is_empty() {
        return Err(StoreError::validation("contact name is required"));
    }
    validate_email(&contact.email)
}

pub(crate) fn validate_appointment(appointment: &Appointment) -> StoreResult<()> {
    if !appointment.span().is_valid() {
        return Err(StoreError::validation(format!(
            "start_time {} must be before end_time {}",
            appointment.start_time, appointment.end_time
        )));
    }
    check_precision("start_time", &appointment.start_time)?;
    check_precision("end_time", &appointment.end_time)?;
    if let Some(date) = &appointment.date {
        check_precision("date", date)?;
    }
    validate_contact(&appointment.contact)
}

/// Relational backends store whole microseconds, so a finer instant would be
/// truncated before the overlap check runs.
fn check_precision(field: &str, instant: &DateTime<Utc>) -> StoreResult<()> {
    if instant.nanosecond() % 1_000 != 0 {
        return Err(StoreError::validation(format!(
            "{field} {instant} has sub-microsecond precision"
        )));
    }
    Ok(())
}
