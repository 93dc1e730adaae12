//! # taskboard
//!
//! A small task board: create, list, search, toggle and delete tasks, persisted
//! to a single CSV file and served as server-rendered HTML.
//!
//! Every page works without client-side scripting. Requests carrying
//! `HX-Request: true` are answered with HTML fragments plus an out-of-band
//! status update instead of full pages and redirects.
//!
//! ## Layout
//!
//! - [`task`]: the `Task` record, its id and title validation
//! - [`csv`]: field escaping and record parsing for the task file
//! - [`db`]: `TaskStore`, the shared CSV-backed collection
//! - [`api`]: axum routes, handlers and HTML views
//! - [`server`]: bind, serve and graceful shutdown
//! - [`cli`] / [`cmd`]: the command line over the same store
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve the board on http://127.0.0.1:3000
//! taskboard serve
//!
//! # Or work with the same file from the terminal
//! taskboard add "Write report"
//! taskboard list --all
//! ```

pub mod api;
pub mod cli;
pub mod cmd;
pub mod csv;
pub mod db;
pub mod error;
pub mod server;
pub mod task;

pub use db::TaskStore;
pub use error::{StoreError, ValidationError};
pub use task::{validate_title, Task, TaskId};
