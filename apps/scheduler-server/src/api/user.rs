//! User API endpoints.

use std::sync::Arc;

use appointment_store::SchedulingBackend;
use axum::{Json, extract::State};
use rpc_protocol::{requests::FindOrCreateUserRequest, responses::FindOrCreateUserResponse};

use crate::error::ServerResult;
use crate::state::AppState;

/// Resolves an email to a user, creating the user on first sight.
pub async fn find_or_create_user<B: SchedulingBackend>(
    State(state): State<Arc<AppState<B>>>,
    Json(request): Json<FindOrCreateUserRequest>,
) -> ServerResult<Json<FindOrCreateUserResponse>> {
    let user = state
        .store
        .users()
        .find_or_create(&request.email, &request.name)
        .await?;

    Ok(Json(FindOrCreateUserResponse { user }))
}
