//! Error types for optgen-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from optgen-core
    #[error(transparent)]
    Core(#[from] optgen_core::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Error for a required argument missing after merging config and flags
    pub fn missing_argument(name: &str) -> Self {
        Self::user(format!("argument '{name}' is required"))
    }
}
