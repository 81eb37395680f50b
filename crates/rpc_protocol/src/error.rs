//! RPC error types

use serde::{Deserialize, Serialize};

/// RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The request body was not understood
    InvalidRequest = -32600,
    /// A parameter failed validation
    InvalidParams = -32602,
    /// Internal error
    InternalError = -32603,
    /// The requested resource was not found
    NotFound = -32003,
    /// The request conflicts with the current state
    Conflict = -32004,
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            -32600 => ErrorCode::InvalidRequest,
            -32602 => ErrorCode::InvalidParams,
            -32003 => ErrorCode::NotFound,
            -32004 => ErrorCode::Conflict,
            _ => ErrorCode::InternalError,
        }
    }
}

/// RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl RpcError {
    /// Creates a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
        }
    }

    /// Creates an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Creates an invalid params error
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    /// Creates an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Creates a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Creates a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self.code)
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

/// Body returned with every failed call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: RpcError,
}

impl From<RpcError> for ErrorResponse {
    fn from(error: RpcError) -> Self {
        Self { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = RpcError::conflict("slot unavailable");
        let json = serde_json::to_string(&ErrorResponse::from(error)).unwrap();

        assert!(json.contains("-32004"));
        assert!(json.contains("slot unavailable"));
    }

    #[test]
    fn test_unknown_code_maps_to_internal() {
        let error = RpcError {
            code: 7,
            message: "?".to_string(),
        };
        assert_eq!(error.error_code(), ErrorCode::InternalError);
        assert_eq!(RpcError::not_found("x").error_code(), ErrorCode::NotFound);
    }
}
