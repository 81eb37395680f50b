//! RPC request types.

use chrono::{DateTime, Utc};
use entities::Contact;
use serde::{Deserialize, Serialize};

// ============================================================================
// User Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindOrCreateUserRequest {
    pub email: String,
    pub name: String,
}

// ============================================================================
// Appointment Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub contact_information: Contact,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAppointmentRequest {
    pub appointment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUserAppointmentsRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAppointmentRequest {
    pub appointment_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_optional_fields() {
        let request: CreateAppointmentRequest = serde_json::from_str(
            r#"{
                "contact_information": {"name": "Ada", "email": "ada@example.com"},
                "start_time": "2025-03-14T10:00:00Z",
                "end_time": "2025-03-14T11:00:00Z"
            }"#,
        )
        .unwrap();

        assert!(request.title.is_none());
        assert!(request.description.is_empty());
        assert_eq!(request.contact_information.email, "ada@example.com");
        assert!(request.start_time < request.end_time);
    }
}
