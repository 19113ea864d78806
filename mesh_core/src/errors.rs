//! # Error Types
//!
//! Structured error types for mesh_core. Every failure in the mesh model is
//! reported at the point of origin and propagated to the caller; nothing is
//! retried and nothing is rolled back.
//!
//! The first four variants form the core taxonomy:
//!
//! - [`MeshError::TypeMismatch`] - a value of the wrong category was passed to
//!   a constrained slot (container entry, container merge)
//! - [`MeshError::DuplicateEntry`] - the same item was added twice under one key
//! - [`MeshError::InvariantViolation`] - a render-time consistency check failed
//! - [`MeshError::Unimplemented`] - a reserved conversion path was requested
//!
//! ## Example
//!
//! ```rust
//! use mesh_core::errors::{MeshError, MeshResult};
//!
//! fn check_radius(radius: f64) -> MeshResult<()> {
//!     if radius <= 0.0 {
//!         return Err(MeshError::invalid_input(
//!             "radius",
//!             radius.to_string(),
//!             "Radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(check_radius(-1.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mesh_core operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Structured error type for mesh operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum MeshError {
    /// A value of the wrong category was passed to a constrained slot
    #[error("Type mismatch: got {found}, expected one of [{expected}]")]
    TypeMismatch { found: String, expected: String },

    /// The same item was added twice to one list
    #[error("Duplicate entry: {item} is already in {target}")]
    DuplicateEntry { item: String, target: String },

    /// A consistency check on assembled data failed
    #[error("Invariant violated: {reason}")]
    InvariantViolation { reason: String },

    /// A conversion path that is reserved but not implemented
    #[error("Not implemented: {feature}")]
    Unimplemented { feature: String },

    /// An item was rendered before the numbering pass assigned its index
    #[error("Missing global index: {item} has not been numbered")]
    MissingIndex { item: String },

    /// A deferred node placeholder could not be resolved
    #[error("Unresolved node placeholder {index} in {context}")]
    UnresolvedNode { index: usize, context: String },

    /// A line of a legacy input file could not be read
    #[error("Parse error in '{line}': {reason}")]
    Parse { line: String, reason: String },

    /// An input value is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl MeshError {
    /// Create a TypeMismatch error
    pub fn type_mismatch(found: impl Into<String>, expected: impl Into<String>) -> Self {
        MeshError::TypeMismatch {
            found: found.into(),
            expected: expected.into(),
        }
    }

    /// Create a DuplicateEntry error
    pub fn duplicate_entry(item: impl Into<String>, target: impl Into<String>) -> Self {
        MeshError::DuplicateEntry {
            item: item.into(),
            target: target.into(),
        }
    }

    /// Create an InvariantViolation error
    pub fn invariant(reason: impl Into<String>) -> Self {
        MeshError::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Create an Unimplemented error
    pub fn unimplemented(feature: impl Into<String>) -> Self {
        MeshError::Unimplemented {
            feature: feature.into(),
        }
    }

    /// Create a MissingIndex error
    pub fn missing_index(item: impl Into<String>) -> Self {
        MeshError::MissingIndex { item: item.into() }
    }

    /// Create an UnresolvedNode error
    pub fn unresolved_node(index: usize, context: impl Into<String>) -> Self {
        MeshError::UnresolvedNode {
            index,
            context: context.into(),
        }
    }

    /// Create a Parse error
    pub fn parse(line: impl Into<String>, reason: impl Into<String>) -> Self {
        MeshError::Parse {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        MeshError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        MeshError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            MeshError::TypeMismatch { .. } => "TYPE_MISMATCH",
            MeshError::DuplicateEntry { .. } => "DUPLICATE_ENTRY",
            MeshError::InvariantViolation { .. } => "INVARIANT_VIOLATION",
            MeshError::Unimplemented { .. } => "UNIMPLEMENTED",
            MeshError::MissingIndex { .. } => "MISSING_INDEX",
            MeshError::UnresolvedNode { .. } => "UNRESOLVED_NODE",
            MeshError::Parse { .. } => "PARSE_ERROR",
            MeshError::InvalidInput { .. } => "INVALID_INPUT",
            MeshError::FileError { .. } => "FILE_ERROR",
            MeshError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for MeshError {
    fn from(e: serde_json::Error) -> Self {
        MeshError::SerializationError {
            reason: e.to_string(),
        }
    }
}
