//! Error types for foamprobe.

use thiserror::Error;

/// The main error type for foamprobe operations.
#[derive(Error, Debug)]
pub enum FoamProbeError {
    /// A part with the given name is already cached.
    #[error("part '{0}' already exists")]
    PartExists(String),

    /// A field with the given name already exists on a mesh.
    #[error("field '{0}' already exists on part '{1}'")]
    FieldExists(String, String),

    /// A color selection named a field outside the configured set.
    #[error("unknown coloring field '{0}'")]
    UnknownField(String),

    /// Per-point data does not match the number of mesh points.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A mesh file could be read but its content is unusable.
    #[error("invalid mesh '{path}': {reason}")]
    InvalidMesh { path: String, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for foamprobe operations.
pub type Result<T> = std::result::Result<T, FoamProbeError>;
