//! Server error types.

use appointment_store::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rpc_protocol::{ErrorResponse, RpcError};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, RpcError::invalid_request(msg.clone()))
            }
            ServerError::Store(StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, RpcError::not_found(self.to_string()))
            }
            ServerError::Store(StoreError::Conflict(_)) => {
                (StatusCode::CONFLICT, RpcError::conflict(self.to_string()))
            }
            ServerError::Store(StoreError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, RpcError::invalid_params(self.to_string()))
            }
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RpcError::internal_error("internal storage error"),
                )
            }
        };

        (status, Json(ErrorResponse::from(error))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
