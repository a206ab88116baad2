//! Error types for the cookbook library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all cookbook operations.
#[derive(Error, Debug)]
pub enum CookbookError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Category not found for the given ID
    #[error("Category with ID {id} not found")]
    CategoryNotFound { id: u64 },
    /// Recipe not found for the given ID
    #[error("Recipe with ID {id} not found")]
    RecipeNotFound { id: u64 },
    /// Another category already uses this name
    #[error("A category named '{name}' already exists")]
    DuplicateCategory { name: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Embedded image payload could not be decoded
    #[error("Image encoding error: {source}")]
    ImageEncoding {
        #[from]
        source: base64::DecodeError,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CookbookError {
        CookbookError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CookbookError {
        CookbookError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CookbookError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps an I/O error with the path it occurred at.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Error for a `spawn_blocking` task that panicked or was cancelled.
    pub(crate) fn join(error: &tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CookbookError::database(message).with_source(e))
    }
}

/// Result type alias for cookbook operations
pub type Result<T> = std::result::Result<T, CookbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = CookbookError::invalid_input("name").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'name': must not be empty"
        );
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load category").unwrap_err();
        assert!(matches!(err, CookbookError::Database { .. }));
        assert_eq!(err.to_string(), "Database error: Failed to load category");
    }

    #[test]
    fn test_duplicate_category_message() {
        let err = CookbookError::DuplicateCategory {
            name: "Soups".to_string(),
        };
        assert!(err.to_string().contains("'Soups'"));
    }
}
