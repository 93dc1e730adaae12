//! Error types shared by the store, the CLI and the HTTP layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::task::TaskId;

/// A title rejected at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Malformed CSV text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unexpected character '{found}' after closing quote")]
    TrailingCharacter { line: usize, found: char },
}

/// Errors raised by the task store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt task file {path}, line {line}: {reason}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("task {0} already exists")]
    DuplicateId(TaskId),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn from_csv(path: impl Into<PathBuf>, error: CsvError) -> Self {
        let line = match error {
            CsvError::UnterminatedQuote { line } | CsvError::TrailingCharacter { line, .. } => line,
        };
        StoreError::corrupt(path, line, error.to_string())
    }
}
