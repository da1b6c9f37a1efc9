//! Error types for the board engine

use crate::types::TaskId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// An operation referenced a task that is not on the board
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Board not found in the board list
    #[error("board not found: {name}")]
    BoardNotFound { name: String },

    /// Another board already uses this name
    #[error("board already exists: {name}")]
    BoardExists { name: String },

    /// Board name cannot be used as a storage key
    #[error("invalid board name '{name}': {reason}")]
    InvalidBoardName { name: String, reason: String },

    /// Template not registered
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// No board has been loaded yet
    #[error("no board is loaded")]
    NoCurrentBoard,

    /// Pinned tasks cannot be dragged on a free-form board
    #[error("task '{id}' is pinned and cannot be dragged")]
    TaskPinned { id: String },

    /// A stored blob could not be parsed
    #[error("stored value for '{key}' is unreadable: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the backing store failed
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be extracted
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl BoardError {
    /// Create a task-not-found error
    pub fn task_not_found(id: &TaskId) -> Self {
        Self::TaskNotFound { id: id.to_string() }
    }

    /// Create a board-not-found error
    pub fn board_not_found(name: impl Into<String>) -> Self {
        Self::BoardNotFound { name: name.into() }
    }

    /// Create an invalid board name error
    pub fn invalid_board_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBoardName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error for the given path
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Check if the error stems from input the user can correct
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::BoardExists { .. }
                | Self::InvalidBoardName { .. }
                | Self::TemplateNotFound { .. }
                | Self::TaskPinned { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::task_not_found(&TaskId::from_string("2024-05-01T10:00:00.000Z"));
        assert_eq!(err.to_string(), "task not found: 2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_invalid_board_name_display() {
        let err = BoardError::invalid_board_name("a/b", "contains '/'");
        assert!(err.to_string().contains("a/b"));
        assert!(err.to_string().contains("contains '/'"));
    }

    #[test]
    fn test_user_errors() {
        assert!(BoardError::BoardExists { name: "x".into() }.is_user_error());
        assert!(BoardError::TaskPinned { id: "x".into() }.is_user_error());
        assert!(!BoardError::NoCurrentBoard.is_user_error());
        assert!(!BoardError::TaskNotFound { id: "x".into() }.is_user_error());
    }
}
