//! Error types for drydock operations.
//!
//! This module defines [`DrydockError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DrydockError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `DrydockError::Other`) for unexpected errors
//! - Probe failures never surface as errors: they degrade to a status value
//! - Remediation failures never surface as errors: they become Problems

use thiserror::Error;

/// Core error type for drydock operations.
#[derive(Debug, Error)]
pub enum DrydockError {
    /// An external provider command could not be spawned at all
    /// (binary absent, permission denied).
    #[error("Failed to invoke command: {command}")]
    CommandSpawn { command: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for drydock operations.
pub type Result<T> = std::result::Result<T, DrydockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spawn_displays_command() {
        let err = DrydockError::CommandSpawn {
            command: "brew --version".into(),
        };
        assert!(err.to_string().contains("brew --version"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DrydockError = io_err.into();
        assert!(matches!(err, DrydockError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(DrydockError::CommandSpawn {
                command: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
