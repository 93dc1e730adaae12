//! Handler errors and their HTML rendering.
//!
//! Plain requests get a small error page; enhanced requests get an
//! out-of-band status fragment so the message lands in the live region.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::extract::HxRequest;
use super::views::{self, Status};
use crate::error::StoreError;

/// An error response carrying its status code, a user-facing message and the
/// request mode it will be rendered for.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub message: String,
    pub mode: HxRequest,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>, mode: HxRequest) -> Self {
        Self {
            status,
            message: message.into(),
            mode,
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>, mode: HxRequest) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, mode)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>, mode: HxRequest) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, mode)
    }

    /// 422 Unprocessable Entity, for rejected input on the enhanced path.
    pub fn unprocessable(message: impl Into<String>, mode: HxRequest) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message, mode)
    }

    /// 500 for a failed store operation. Details are logged, not rendered.
    pub fn storage(error: StoreError, mode: HxRequest) -> Self {
        tracing::error!(%error, "task store operation failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong while saving your tasks. Please try again.",
            mode,
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let body = if self.mode.is_enhanced() {
            views::status(&Status::error(self.message), true)
        } else {
            views::error_page(self.status, &self.message)
        };
        (self.status, Html(body)).into_response()
    }
}
