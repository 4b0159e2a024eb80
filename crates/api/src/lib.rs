//! HTTP API server with observability for the user and todo item services.
//!
//! Provides REST endpoints over the application services, a uniform JSON
//! response envelope, structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;

use std::sync::Arc;

use application::{EventPublisher, TodoItemService, TracingEventPublisher, UserService};
use axum::Router;
use axum::routing::{get, post, put};
use common::{Clock, DefaultClock};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{InMemoryTodoItemRepository, InMemoryUserRepository};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub users: UserService<InMemoryUserRepository>,
    pub todos: TodoItemService<InMemoryTodoItemRepository>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/users", get(routes::users::list).post(routes::users::create))
        .route("/api/users/by-email/{email}", get(routes::users::get_by_email))
        .route(
            "/api/users/{id}",
            get(routes::users::get)
                .put(routes::users::update)
                .delete(routes::users::delete),
        )
        .route("/api/users/{id}/deactivate", post(routes::users::deactivate))
        .route("/api/users/{id}/activate", post(routes::users::activate))
        .route("/api/users/{id}/login", post(routes::users::login))
        .route("/api/todos", get(routes::todos::list).post(routes::todos::create))
        .route(
            "/api/todos/{id}",
            get(routes::todos::get).delete(routes::todos::delete),
        )
        .route("/api/todos/{id}/complete", put(routes::todos::complete))
        .route("/api/todos/{id}/rename", put(routes::todos::rename))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Creates application state with in-memory stores and the given
/// collaborators.
pub fn create_state(clock: Arc<dyn Clock>, publisher: Arc<dyn EventPublisher>) -> Arc<AppState> {
    Arc::new(AppState {
        users: UserService::new(
            InMemoryUserRepository::new(),
            clock.clone(),
            publisher.clone(),
        ),
        todos: TodoItemService::new(InMemoryTodoItemRepository::new(), clock, publisher),
    })
}

/// Creates the default application state: system clock, events logged.
pub fn create_default_state() -> Arc<AppState> {
    create_state(Arc::new(DefaultClock), Arc::new(TracingEventPublisher))
}
