//! Routing definitions.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Build the application router with all routes, tracing and state.
///
/// ```ignore
/// let store = TaskStore::open("tasks.csv")?;
/// let router = create_router(AppState::new(store));
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/tasks/search", get(handlers::search_tasks))
        .route("/tasks/{id}/toggle", post(handlers::toggle_task))
        .route("/tasks/{id}/delete", post(handlers::delete_task))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
