//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use application::RecordingEventPublisher;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use common::FixedClock;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> Router {
    api::create_app(api::create_default_state(), get_metrics_handle())
}

fn setup_with_publisher() -> (Router, RecordingEventPublisher) {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap(),
    ));
    let publisher = RecordingEventPublisher::new();
    let state = api::create_state(clock, Arc::new(publisher.clone()));
    (api::create_app(state, get_metrics_handle()), publisher)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

async fn create_user(app: &Router, email: &str, full_name: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/api/users",
        Some(json!({ "email": email, "full_name": full_name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {json}");
    json["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

mod users {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let app = setup();

        let (status, json) = send(
            &app,
            "POST",
            "/api/users",
            Some(json!({ "email": "Ann@Example.com", "full_name": "Ann Smith" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User created successfully");
        assert_eq!(json["data"]["email"], "ann@example.com");
        assert_eq!(json["data"]["is_active"], true);
        assert!(json["timestamp"].is_string());

        let id = json["data"]["id"].as_str().unwrap();
        let (status, json) = send(&app, "GET", &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["full_name"], "Ann Smith");

        let (status, json) = send(&app, "GET", "/api/users/by-email/ANN@example.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], id);
    }

    #[tokio::test]
    async fn test_validation_failure_is_bad_request() {
        let app = setup();

        let (status, json) = send(
            &app,
            "POST",
            "/api/users",
            Some(json!({ "email": "not-an-email", "full_name": "Ann" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "Email.InvalidFormat");
        assert_eq!(json["error"]["type"], "Validation");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let app = setup();
        create_user(&app, "ann@example.com", "Ann").await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/users",
            Some(json!({ "email": "ann@example.com", "full_name": "Ann Again" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "User.Email.AlreadyExists");
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let app = setup();

        let (status, json) = send(
            &app,
            "GET",
            "/api/users/00000000-0000-0000-0000-000000000001",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "User.NotFound");

        let (status, json) = send(&app, "GET", "/api/users/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "Request.InvalidId");
    }

    #[tokio::test]
    async fn test_update_user() {
        let app = setup();
        let id = create_user(&app, "ann@example.com", "Ann").await;

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "email": "ann@work.com", "full_name": "Ann Smith" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["email"], "ann@work.com");
        assert_eq!(json["data"]["full_name"], "Ann Smith");

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "email": "ann@work.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "User.Email.SameAsOld");
    }

    #[tokio::test]
    async fn test_deactivate_and_activate() {
        let app = setup();
        let id = create_user(&app, "ann@example.com", "Ann").await;
        let deactivate = format!("/api/users/{id}/deactivate");
        let activate = format!("/api/users/{id}/activate");

        let (status, json) = send(&app, "POST", &deactivate, Some(json!({ "reason": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "User.Deactivate.ReasonRequired");

        let (status, json) =
            send(&app, "POST", &deactivate, Some(json!({ "reason": "left" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "User deactivated successfully");

        let (status, json) =
            send(&app, "POST", &deactivate, Some(json!({ "reason": "left" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["type"], "Conflict");

        let (_, json) = send(&app, "GET", "/api/users?active_only=true", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
        let (_, json) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "POST", &activate, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, json) = send(&app, "POST", &activate, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "User.AlreadyActive");
    }

    #[tokio::test]
    async fn test_login_and_delete() {
        let (app, publisher) = setup_with_publisher();
        let id = create_user(&app, "ann@example.com", "Ann").await;

        let (status, _) = send(&app, "POST", &format!("/api/users/{id}/login"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send(&app, "GET", &format!("/api/users/{id}"), None).await;
        assert_eq!(json["data"]["last_login_at"], "2024-09-01T12:00:00Z");

        let (status, _) = send(&app, "DELETE", &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(publisher.event_types().await, vec!["UserCreated"]);
    }
}

mod todos {
    use super::*;

    #[tokio::test]
    async fn test_todo_lifecycle() {
        let (app, publisher) = setup_with_publisher();

        let (status, json) =
            send(&app, "POST", "/api/todos", Some(json!({ "title": "  Buy milk " }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["title"], "Buy milk");
        let id = json["data"]["id"].as_str().unwrap().to_string();

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/todos/{id}/rename"),
            Some(json!({ "title": "Buy oat milk" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Buy oat milk");

        for _ in 0..2 {
            let (status, json) =
                send(&app, "PUT", &format!("/api/todos/{id}/complete"), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["is_completed"], true);
        }

        let (_, json) = send(&app, "GET", "/api/todos", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "DELETE", &format!("/api/todos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, json) = send(&app, "GET", &format!("/api/todos/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "TodoItem.NotFound");

        assert_eq!(
            publisher.event_types().await,
            vec!["TodoItemCreated", "TodoItemRenamed", "TodoItemCompleted"]
        );
    }

    #[tokio::test]
    async fn test_blank_title_is_bad_request() {
        let app = setup();

        let (status, json) = send(&app, "POST", "/api/todos", Some(json!({ "title": " " }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "TodoItem.Title.Empty");
    }
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    create_user(&app, "metrics@example.com", "Metrics User").await;
    send(&app, "GET", "/api/users/not-a-uuid", None).await;

    let (status, body) = send(&app, "GET", "/metrics", None).await;

    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap();
    assert!(text.contains("users_created_total"));
    assert!(text.contains("domain_events_published_total"));
    assert!(text.contains("business_failures_total"));
}

mod failure_envelope {
    use super::*;
    use axum::routing::get;
    use tower_http::catch_panic::CatchPanicLayer;

    #[tokio::test]
    async fn test_missing_body_field_is_bad_request() {
        let app = setup();

        let (status, json) =
            send(&app, "POST", "/api/users", Some(json!({ "email": "a@b.com" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "Request.InvalidBody");
        assert_eq!(json["error"]["type"], "Validation");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = setup();
        let request = Request::builder()
            .method("POST")
            .uri("/api/todos")
            .header("content-type", "application/json")
            .body(Body::from("{\"title\":"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "Request.InvalidBody");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let app = setup();
        let request = Request::builder()
            .method("POST")
            .uri("/api/todos")
            .body(Body::from(json!({ "title": "Buy milk" }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_envelope() {
        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(api::error::handle_panic));

        let (status, json) = send(&app, "GET", "/explode", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "Server.Unexpected");
        assert_eq!(json["error"]["message"], "An unexpected error occurred");
    }
}
