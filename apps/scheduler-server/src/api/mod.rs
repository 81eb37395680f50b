//! API endpoints.

pub mod appointment;
pub mod user;

use std::sync::Arc;

use appointment_store::SchedulingBackend;
use axum::{
    Router,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    error::{ServerError, ServerResult},
    state::AppState,
};

/// Creates the API router with all endpoints.
pub fn create_router<B: SchedulingBackend + 'static>() -> Router<Arc<AppState<B>>> {
    Router::new()
        // User endpoints
        .route("/api/user/find-or-create", post(user::find_or_create_user))
        // Appointment endpoints
        .route("/api/appointment/create", post(appointment::create_appointment))
        .route("/api/appointment/get", post(appointment::get_appointment))
        .route(
            "/api/appointment/list-by-user",
            post(appointment::list_user_appointments),
        )
        .route("/api/appointment/delete", post(appointment::delete_appointment))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Parses an id field from a request body.
fn parse_id(field: &str, value: &str) -> ServerResult<Uuid> {
    value
        .trim()
        .parse()
        .map_err(|_| ServerError::InvalidRequest(format!("Invalid {field}")))
}

#[cfg(test)]
mod tests {
    use appointment_store::FileBackend;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::{
        config::{BackendKind, Config},
        create_app, create_state,
    };

    fn test_app() -> (TempDir, axum::Router) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            backend: BackendKind::File,
            database_url: None,
            data_file: dir.path().join("db.json"),
            max_connections: 1,
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
        };
        let backend = FileBackend::new(&config.data_file);
        let app = create_app(create_state(config, backend));
        (dir, app)
    }

    async fn call(app: &axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::post(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn booking(email: &str, start: &str, end: &str) -> Value {
        json!({
            "description": "Haircut",
            "contact_information": {"name": "Test User", "email": email},
            "start_time": start,
            "end_time": end,
        })
    }

    #[tokio::test]
    async fn test_booking_flow() {
        let (_dir, app) = test_app();

        let (status, body) = call(
            &app,
            "/api/appointment/create",
            booking("u@example.com", "2025-03-14T10:00:00Z", "2025-03-14T11:00:00Z"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let appointment_id = body["appointment"]["id"].as_str().unwrap().to_string();
        let user_id = body["appointment"]["user_id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            "/api/appointment/create",
            booking("o@example.com", "2025-03-14T10:30:00Z", "2025-03-14T11:30:00Z"),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], -32004);
        assert!(body["error"]["message"].as_str().unwrap().contains("overlap"));

        let (status, body) = call(
            &app,
            "/api/appointment/list-by-user",
            json!({ "user_id": user_id }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appointments"].as_array().unwrap().len(), 1);

        let (status, body) = call(
            &app,
            "/api/appointment/delete",
            json!({ "appointment_id": appointment_id }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);

        let (status, _) = call(
            &app,
            "/api/appointment/get",
            json!({ "appointment_id": appointment_id }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_find_or_create_user_is_stable() {
        let (_dir, app) = test_app();

        let (_, first) = call(
            &app,
            "/api/user/find-or-create",
            json!({"email": "a@x.com", "name": "A"}),
        )
        .await;
        let (status, second) = call(
            &app,
            "/api/user/find-or-create",
            json!({"email": "a@x.com", "name": "B"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["user"]["id"], second["user"]["id"]);
        assert_eq!(second["user"]["name"], "B");
    }

    #[tokio::test]
    async fn test_invalid_inputs_are_bad_requests() {
        let (_dir, app) = test_app();

        let (status, _) = call(
            &app,
            "/api/appointment/get",
            json!({ "appointment_id": "not-a-uuid" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &app,
            "/api/appointment/create",
            booking("u@example.com", "2025-03-14T11:00:00Z", "2025-03-14T10:00:00Z"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], -32602);
    }
}
