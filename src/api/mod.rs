//! HTTP surface: routes, handlers, extractors and HTML views.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use error::ApiErrorResponse;
pub use extract::HxRequest;
pub use routes::create_router;
pub use state::AppState;
