//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct, its opaque `TaskId`, the title
//! validation rule applied before a task may enter the store, and the ordered
//! field view shared by the CSV store and the renderers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Minimum title length, in characters, after trimming.
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length, in characters, after trimming.
pub const TITLE_MAX_CHARS: usize = 100;

/// Opaque task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight characters, for compact display.
    pub fn short(&self) -> String {
        self.to_string().chars().take(8).collect()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A single item on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Absent only for rows read from files written before timestamps existed.
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Field order of the persisted record.
    pub const FIELDS: [&'static str; 4] = ["id", "title", "completed", "created_at"];

    /// Create an open task from an already validated title.
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: TaskId::generate(),
            title: title.into(),
            completed: false,
            created_at: Some(Utc::now()),
        }
    }

    /// Field values in `FIELDS` order.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.title.clone(),
            self.completed.to_string(),
            self.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ]
    }

    /// Rebuild a task from record fields (`id`, `title`, `completed` and an optional
    /// `created_at`). The title is taken as-is.
    pub fn from_record(fields: &[String]) -> Result<Self, String> {
        let (id, title, completed, created) = match fields {
            [id, title, completed] => (id, title, completed, None),
            [id, title, completed, created] => (id, title, completed, Some(created)),
            _ => return Err(format!("expected 3 or 4 fields, found {}", fields.len())),
        };

        let id = id
            .parse::<TaskId>()
            .map_err(|e| format!("invalid id '{id}': {e}"))?;
        let completed = parse_bool(completed)
            .ok_or_else(|| format!("invalid completed flag '{completed}'"))?;
        let created_at = match created.map(|s| s.trim()) {
            None | Some("") => None,
            Some(s) => Some(
                DateTime::parse_from_rfc3339(s)
                    .map_err(|e| format!("invalid created_at '{s}': {e}"))?
                    .with_timezone(&Utc),
            ),
        };

        Ok(Task {
            id,
            title: title.clone(),
            completed,
            created_at,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Validate a raw title, returning it trimmed.
pub fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::new("Title is required"));
    }
    let len = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        return Err(ValidationError::new(format!(
            "Title must be between {TITLE_MIN_CHARS} and {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}
