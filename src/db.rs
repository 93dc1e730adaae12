//! CSV-backed task storage.
//!
//! `TaskStore` owns the authoritative in-memory collection and the file that
//! mirrors it. Every mutation rewrites the whole file through a temp file and a
//! rename, and only then replaces the in-memory collection, so readers never see
//! state that failed to persist.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::csv::{parse_records, write_record};
use crate::error::StoreError;
use crate::task::{Task, TaskId};

/// Header written by older versions, before creation timestamps were stored.
const LEGACY_FIELDS: [&str; 3] = ["id", "title", "completed"];

/// Shared, file-backed task collection.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Open the store at `path`. A missing file is an empty store; the file is
    /// created on the first mutation. A malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = load(&path)?;
        tracing::debug!(path = %path.display(), count = tasks.len(), "task store loaded");
        Ok(TaskStore {
            path,
            tasks: RwLock::new(tasks),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }

    /// All tasks in insertion order.
    pub fn get_all(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    pub fn get_by_id(&self, id: TaskId) -> Option<Task> {
        self.tasks.read().iter().find(|t| t.id == id).cloned()
    }

    /// Case-insensitive substring match on titles. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<Task> {
        let needle = query.trim().to_lowercase();
        let tasks = self.tasks.read();
        if needle.is_empty() {
            return tasks.clone();
        }
        tasks
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Append a validated task and persist.
    pub fn add(&self, task: Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write();
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::DuplicateId(task.id));
        }
        let mut next = tasks.clone();
        next.push(task);
        save(&self.path, &next)?;
        *tasks = next;
        Ok(())
    }

    /// Flip `completed` on the task with `id` and persist. `Ok(None)` if absent.
    pub fn toggle_complete(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write();
        let Some(idx) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let mut next = tasks.clone();
        next[idx].completed = !next[idx].completed;
        let updated = next[idx].clone();
        save(&self.path, &next)?;
        *tasks = next;
        Ok(Some(updated))
    }

    /// Remove the task with `id` and persist. `Ok(false)` if absent.
    pub fn delete(&self, id: TaskId) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write();
        let Some(idx) = tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        let mut next = tasks.clone();
        next.remove(idx);
        save(&self.path, &next)?;
        *tasks = next;
        Ok(true)
    }
}

/// Read tasks from `path`, treating a missing or empty file as an empty collection.
fn load(path: &Path) -> Result<Vec<Task>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let records = parse_records(&content).map_err(|e| StoreError::from_csv(path, e))?;
    let mut records = records.into_iter();
    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };

    let width = if header.fields == Task::FIELDS {
        Task::FIELDS.len()
    } else if header.fields == LEGACY_FIELDS {
        LEGACY_FIELDS.len()
    } else {
        return Err(StoreError::corrupt(
            path,
            header.line,
            format!(
                "unexpected header '{}', expected '{}'",
                header.fields.join(","),
                Task::FIELDS.join(",")
            ),
        ));
    };

    let mut tasks: Vec<Task> = Vec::new();
    for record in records {
        if record.fields.len() != width {
            return Err(StoreError::corrupt(
                path,
                record.line,
                format!("expected {width} fields, found {}", record.fields.len()),
            ));
        }
        let task = Task::from_record(&record.fields)
            .map_err(|reason| StoreError::corrupt(path, record.line, reason))?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::corrupt(
                path,
                record.line,
                format!("duplicate id {}", task.id),
            ));
        }
        tasks.push(task);
    }
    Ok(tasks)
}

/// Rewrite the whole file atomically (temp file + rename).
fn save(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let mut data = write_record(&Task::FIELDS);
    for task in tasks {
        data.push_str(&write_record(&task.to_record()));
    }

    let tmp = path.with_extension("csv.tmp");
    let write_tmp = || -> std::io::Result<()> {
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        f.sync_all()
    };
    write_tmp().map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;

    tracing::trace!(path = %path.display(), count = tasks.len(), "task file rewritten");
    Ok(())
}
