//! Error types for loading style specs and documents
//!
//! Document violations are never errors: they are reported as
//! [`Diagnostic`](crate::Diagnostic)s. `SpecError` covers everything that
//! happens before validation can start.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for load-time operations
pub type Result<T> = std::result::Result<T, SpecError>;

/// Style spec and document loading errors
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Style spec root must be an object, found {found}")]
    NotAnObject { found: String },

    #[error("Style spec is missing an integer \"$version\"")]
    MissingVersion,

    #[error("Style spec node \"{node}\" references unknown type \"{type_name}\"")]
    UnresolvedType { node: String, type_name: String },

    #[error("Style spec has no \"{0}\" node")]
    MissingNode(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
