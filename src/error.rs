//! Error types for surfpatch.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`PatchError`].
pub type Result<T> = std::result::Result<T, PatchError>;

/// Errors that can occur while building graphs or computing patches.
#[derive(Error, Debug)]
pub enum PatchError {
    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// A vertex index is outside the mesh's vertex range.
    #[error("vertex {vertex} out of range (mesh has {num_vertices} vertices)")]
    VertexOutOfRange {
        /// The invalid vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A per-vertex attribute has the wrong length.
    #[error("attribute \"{name}\" has {actual} values, expected {expected}")]
    AttributeLengthMismatch {
        /// The attribute name.
        name: String,
        /// Expected length (vertex count).
        expected: usize,
        /// Actual length supplied.
        actual: usize,
    },

    /// No shortest-path backend is configured on the engine.
    #[error("no shortest-path backend configured")]
    MissingBackend,

    /// The computation was cancelled by the caller.
    #[error("patch computation cancelled")]
    Cancelled,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PatchError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        PatchError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
