//! Error types for staging operations.

use crate::Bitness;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a staging run.
#[derive(Debug, Error)]
pub enum StageError {
    /// A native loader binary is missing.
    #[error("File does not exist ({bitness} loader): {}", .path.display())]
    LoaderNotFound { bitness: Bitness, path: PathBuf },

    /// Both bit-width suffixes are the same, ignoring case.
    #[error(
        "32-bit add-in suffix and 64-bit add-in suffix cannot be identical ('{suffix32}' vs '{suffix64}')"
    )]
    IdenticalSuffixes { suffix32: String, suffix64: String },

    /// A copy or directory creation failed while staging.
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl StageError {
    /// Stable numeric code for this error, suitable for host build systems.
    pub fn error_code(&self) -> u32 {
        match self {
            StageError::LoaderNotFound { .. } => 1,
            StageError::IdenticalSuffixes { .. } => 2,
            StageError::Io { .. } => 3,
            StageError::InvalidConfig(_) => 4,
            StageError::ConfigParse(_) => 5,
        }
    }

    /// Whether the error was raised before any file was touched.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, StageError::Io { .. })
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StageError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
