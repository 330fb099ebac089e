//! Common error types and handling for Scriptsync

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Scriptsync application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether the current command should continue past this error.
    ///
    /// Only not-found conditions are recoverable: a pull records them per
    /// scope element and moves on, a push aborts just the one save. Every
    /// other class is fatal to the command that raised it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Get the error code for log output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Io(_) => "WRITE_ERROR",
            Error::Workspace(_) => "WORKSPACE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
        }
    }
}
