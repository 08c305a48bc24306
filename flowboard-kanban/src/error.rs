//! Error types for the kanban engine

use flowboard_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Update or remove targeted an id that is not stored
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// A card was pointed at a column that does not exist
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Column still has cards and cannot be deleted
    #[error("column '{id}' has {count} cards and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    /// Board still has columns and cannot be deleted
    #[error("board '{id}' has {count} columns and cannot be deleted")]
    BoardNotEmpty { id: String, count: usize },

    /// User is still referenced by cards or boards
    #[error("user '{id}' is referenced {count} times and cannot be deleted")]
    UserAssigned { id: String, count: usize },

    /// Fixture file could not be parsed
    #[error("invalid fixture '{name}': {source}")]
    Fixture {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Fixture file could not be read
    #[error("failed to read fixture '{}': {source}", path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl KanbanError {
    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// True for the "entity not found" family
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::ColumnNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::not_found("card", "abc123");
        assert_eq!(err.to_string(), "card not found: abc123");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(KanbanError::not_found("board", "1").is_not_found());
        assert!(KanbanError::ColumnNotFound { id: "x".into() }.is_not_found());
        assert!(!KanbanError::ColumnNotEmpty {
            id: "x".into(),
            count: 2
        }
        .is_not_found());
    }

    #[test]
    fn test_fixture_read_display_names_path() {
        let err = KanbanError::FixtureRead {
            path: PathBuf::from("seed/card.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read fixture 'seed/card.json': missing");
    }

    #[test]
    fn test_column_not_empty_display() {
        let err = KanbanError::ColumnNotEmpty {
            id: "todo".into(),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "column 'todo' has 3 cards and cannot be deleted"
        );
    }
}
