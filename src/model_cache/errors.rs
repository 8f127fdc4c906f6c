//! model_cache::errors — failures while generating, storing or loading models.
//!
//! Conventions
//! -----------
//! - Paths are carried as displayed strings so the enum stays `Clone` and
//!   `PartialEq`, matching the other error types of the crate.
//! - Load-side problems (missing, unreadable, corrupt, mismatched artifacts)
//!   are normally absorbed by the lifecycle manager and trigger regeneration;
//!   only store failures and build failures reach the caller.
use crate::automatic_differentiation::errors::AdError;

/// Result alias for model cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheError {
    // ---- Settings ----
    /// Model name is empty, a path component, or contains unsupported characters.
    InvalidModelName { name: String, reason: &'static str },

    // ---- Storage ----
    /// Reading or writing an artifact failed.
    Io { path: String, kind: std::io::ErrorKind, text: String },

    /// An artifact could not be serialized or parsed.
    CorruptArtifact { path: String, text: String },

    /// The in-memory store lock was poisoned by a panicking writer.
    Poisoned,

    // ---- Generation ----
    /// Building the model from its definition failed.
    Generation(AdError),
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Generation(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Settings ----
            CacheError::InvalidModelName { name, reason } => {
                write!(f, "Invalid model name '{name}': {reason}")
            }

            // ---- Storage ----
            CacheError::Io { path, kind, text } => {
                write!(f, "I/O error ({kind:?}) on '{path}': {text}")
            }
            CacheError::CorruptArtifact { path, text } => {
                write!(f, "Corrupt model artifact '{path}': {text}")
            }
            CacheError::Poisoned => write!(f, "Model cache lock poisoned"),

            // ---- Generation ----
            CacheError::Generation(err) => write!(f, "Model generation failed: {err}"),
        }
    }
}

impl From<AdError> for CacheError {
    fn from(err: AdError) -> Self {
        CacheError::Generation(err)
    }
}

impl CacheError {
    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        CacheError::Io { path: path.display().to_string(), kind: err.kind(), text: err.to_string() }
    }

    pub(crate) fn corrupt(path: &std::path::Path, err: &serde_json::Error) -> Self {
        CacheError::CorruptArtifact { path: path.display().to_string(), text: err.to_string() }
    }
}
