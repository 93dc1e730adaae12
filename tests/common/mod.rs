//! Shared helpers for integration tests.
//!
//! Each test binary compiles this module separately, so helpers used by only
//! one of them would otherwise warn as dead code.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use taskboard::api::{create_router, AppState};
use taskboard::{Task, TaskStore};

/// A router over a store in a fresh temp directory. Keep the `TempDir` alive
/// for the duration of the test.
pub struct TestApp {
    pub dir: TempDir,
    pub store: Arc<TaskStore>,
    pub router: Router,
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").and_then(|v| v.to_str().ok())
    }
}

pub fn create_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(TaskStore::open(dir.path().join("tasks.csv")).unwrap());
    let router = create_router(AppState::from_arc(Arc::clone(&store)));
    TestApp { dir, store, router }
}

impl TestApp {
    /// Add a task straight through the store.
    pub fn seed(&self, title: &str) -> Task {
        let task = Task::new(title);
        self.store.add(task.clone()).unwrap();
        task
    }

    pub async fn get(&self, uri: &str, enhanced: bool) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if enhanced {
            builder = builder.header("HX-Request", "true");
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, enhanced: bool) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if enhanced {
            builder = builder.header("HX-Request", "true");
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
