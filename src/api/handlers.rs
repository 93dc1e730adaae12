//! HTTP handlers for the task board.
//!
//! Every handler has the same shape: validate input, make one store call, then
//! render either the plain response (a page or a redirect-after-post) or the
//! enhanced one (fragments plus an out-of-band status update).

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use super::error::ApiErrorResponse;
use super::extract::HxRequest;
use super::state::AppState;
use super::views::{self, Status};
use crate::task::{validate_title, Task, TaskId};

/// Where plain requests are sent after a mutation.
pub const TASKS_PATH: &str = "/tasks";

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /tasks`. A missing field is treated as an empty title.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskForm {
    #[serde(default)]
    pub title: String,
}

/// Query string of `GET /tasks/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub tasks: usize,
}

// =============================================================================
// Pages
// =============================================================================

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::to(TASKS_PATH)
}

/// `GET /tasks`: full page, regardless of mode.
pub async fn list_tasks(State(state): State<AppState>) -> Html<String> {
    Html(views::page(&state.store.get_all(), "", None))
}

/// `GET /tasks/search?q=`
pub async fn search_tasks(
    State(state): State<AppState>,
    hx: HxRequest,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let tasks = state.store.search(&query.q);
    tracing::debug!(query = %query.q, hits = tasks.len(), "search");

    if !hx.is_enhanced() {
        return Html(views::page(&tasks, &query.q, None));
    }

    let status = search_status(&query.q, tasks.len());
    Html(format!(
        "{}{}",
        views::task_list(&tasks),
        views::status(&status, true)
    ))
}

fn search_status(query: &str, hits: usize) -> Status {
    let query = query.trim();
    match (query.is_empty(), hits) {
        (true, 0) => Status::info("No tasks yet."),
        (true, 1) => Status::info("Showing 1 task."),
        (true, n) => Status::info(format!("Showing all {n} tasks.")),
        (false, 0) => Status::info(format!("No tasks match \"{query}\".")),
        (false, 1) => Status::info("1 task found."),
        (false, n) => Status::info(format!("{n} tasks found.")),
    }
}

// =============================================================================
// Mutations
// =============================================================================

/// `POST /tasks`
pub async fn create_task(
    State(state): State<AppState>,
    hx: HxRequest,
    Form(form): Form<CreateTaskForm>,
) -> Result<Response, ApiErrorResponse> {
    let title = match validate_title(&form.title) {
        Ok(title) => title,
        Err(error) => {
            tracing::warn!(%error, "rejected task title");
            if hx.is_enhanced() {
                return Err(ApiErrorResponse::unprocessable(error.message, hx));
            }
            // No way to carry the message through the redirect.
            return Ok(Redirect::to(TASKS_PATH).into_response());
        }
    };

    let task = Task::new(title);
    state
        .store
        .add(task.clone())
        .map_err(|e| ApiErrorResponse::storage(e, hx))?;
    tracing::info!(id = %task.id, title = %task.title, "task added");

    if !hx.is_enhanced() {
        return Ok(Redirect::to(TASKS_PATH).into_response());
    }
    let status = Status::success(format!("Task \"{}\" added successfully.", task.title));
    Ok(fragments(&views::task_item(&task), &status))
}

/// `POST /tasks/{id}/toggle`
pub async fn toggle_task(
    State(state): State<AppState>,
    hx: HxRequest,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let id = parse_task_id(&raw_id, hx)?;
    let Some(task) = state
        .store
        .toggle_complete(id)
        .map_err(|e| ApiErrorResponse::storage(e, hx))?
    else {
        tracing::warn!(%id, "toggle of unknown task");
        return Err(not_found(&raw_id, hx));
    };
    tracing::info!(%id, completed = task.completed, "task toggled");

    if !hx.is_enhanced() {
        return Ok(Redirect::to(TASKS_PATH).into_response());
    }
    let state_text = if task.completed {
        "marked complete"
    } else {
        "marked incomplete"
    };
    let status = Status::success(format!("Task \"{}\" {state_text}.", task.title));
    Ok(fragments(&views::task_item(&task), &status))
}

/// `POST /tasks/{id}/delete`
pub async fn delete_task(
    State(state): State<AppState>,
    hx: HxRequest,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let id = parse_task_id(&raw_id, hx)?;
    let removed = state
        .store
        .delete(id)
        .map_err(|e| ApiErrorResponse::storage(e, hx))?;
    if !removed {
        tracing::warn!(%id, "delete of unknown task");
        return Err(not_found(&raw_id, hx));
    }
    tracing::info!(%id, "task deleted");

    if !hx.is_enhanced() {
        return Ok(Redirect::to(TASKS_PATH).into_response());
    }
    // Empty primary content removes the row; only the status is swapped in.
    Ok(fragments("", &Status::success("Task deleted.")))
}

// =============================================================================
// Health
// =============================================================================

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        tasks: state.store.len(),
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn fragments(primary: &str, status: &Status) -> Response {
    Html(format!("{primary}{}", views::status(status, true))).into_response()
}

fn parse_task_id(raw: &str, hx: HxRequest) -> Result<TaskId, ApiErrorResponse> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiErrorResponse::bad_request("Task id is required.", hx));
    }
    // An id that cannot parse cannot exist either.
    raw.parse().map_err(|_| not_found(raw, hx))
}

fn not_found(raw_id: &str, hx: HxRequest) -> ApiErrorResponse {
    ApiErrorResponse::not_found(format!("Task {} not found.", raw_id.trim()), hx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0, "No tasks yet.")]
    #[case("", 1, "Showing 1 task.")]
    #[case("", 3, "Showing all 3 tasks.")]
    #[case("milk", 0, "No tasks match \"milk\".")]
    #[case("milk", 1, "1 task found.")]
    #[case(" milk ", 2, "2 tasks found.")]
    fn search_status_messages(#[case] query: &str, #[case] hits: usize, #[case] expected: &str) {
        assert_eq!(search_status(query, hits).message, expected);
    }

    #[test]
    fn blank_id_is_bad_request() {
        let err = parse_task_id("  ", HxRequest(false)).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_task_id("nope", HxRequest(true)).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn valid_id_parses() {
        let id = TaskId::generate();
        assert_eq!(parse_task_id(&id.to_string(), HxRequest(false)).unwrap(), id);
    }
}
