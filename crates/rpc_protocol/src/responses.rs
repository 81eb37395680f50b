//! RPC response types.

use entities::{Appointment, User};
use serde::{Deserialize, Serialize};

// ============================================================================
// User Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindOrCreateUserResponse {
    pub user: User,
}

// ============================================================================
// Appointment Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentResponse {
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAppointmentResponse {
    pub appointment: Appointment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUserAppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAppointmentResponse {
    pub deleted: bool,
}
