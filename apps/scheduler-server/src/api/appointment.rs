//! Appointment API endpoints.

use std::sync::Arc;

use appointment_store::{BookingRequest, SchedulingBackend};
use axum::{Json, extract::State};
use rpc_protocol::{requests::*, responses::*};

use super::parse_id;
use crate::error::ServerResult;
use crate::state::AppState;

/// Books an appointment, creating the contact's user if needed.
pub async fn create_appointment<B: SchedulingBackend>(
    State(state): State<Arc<AppState<B>>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> ServerResult<Json<CreateAppointmentResponse>> {
    tracing::debug!(
        email = %request.contact_information.email,
        start_time = %request.start_time,
        end_time = %request.end_time,
        "Booking request"
    );

    let booking = BookingRequest {
        contact: request.contact_information,
        title: request.title,
        description: request.description,
        start_time: request.start_time,
        end_time: request.end_time,
        date: request.date,
    };

    let appointment = state.store.book(booking).await?;

    Ok(Json(CreateAppointmentResponse { appointment }))
}

/// Gets an appointment by ID.
pub async fn get_appointment<B: SchedulingBackend>(
    State(state): State<Arc<AppState<B>>>,
    Json(request): Json<GetAppointmentRequest>,
) -> ServerResult<Json<GetAppointmentResponse>> {
    let id = parse_id("appointment_id", &request.appointment_id)?;
    let appointment = state.store.get(id).await?;

    Ok(Json(GetAppointmentResponse { appointment }))
}

/// Lists a user's appointments.
pub async fn list_user_appointments<B: SchedulingBackend>(
    State(state): State<Arc<AppState<B>>>,
    Json(request): Json<ListUserAppointmentsRequest>,
) -> ServerResult<Json<ListUserAppointmentsResponse>> {
    let user_id = parse_id("user_id", &request.user_id)?;
    let appointments = state.store.list_by_user(user_id).await?;

    Ok(Json(ListUserAppointmentsResponse { appointments }))
}

/// Deletes an appointment.
pub async fn delete_appointment<B: SchedulingBackend>(
    State(state): State<Arc<AppState<B>>>,
    Json(request): Json<DeleteAppointmentRequest>,
) -> ServerResult<Json<DeleteAppointmentResponse>> {
    let id = parse_id("appointment_id", &request.appointment_id)?;
    let deleted = state.store.delete(id).await?;

    Ok(Json(DeleteAppointmentResponse { deleted }))
}
