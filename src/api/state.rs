use std::sync::Arc;

use crate::db::TaskStore;

/// Shared application dependencies, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<TaskStore>) -> Self {
        Self { store }
    }
}
