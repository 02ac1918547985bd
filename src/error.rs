//! Error types for cdgraphlayout.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for layout operations.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },

    #[error("{} is an empty file", path.display())]
    EmptyFile { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CX document: {0}")]
    Cx(String),

    #[error("Could not parse bounding box coordinates from input string: {0}")]
    BoundingBoxFormat(String),

    #[error("invalid coordinate '{value}' in bounding box string: {input}")]
    BoundingBoxCoordinate { value: String, input: String },

    #[error("scale must be a finite number, got {0}")]
    InvalidScale(f64),

    #[error("Unknown layout algorithm '{0}'")]
    UnknownAlgorithm(String),
}

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

impl LayoutError {
    /// Create a new CX format error.
    pub fn cx(msg: impl Into<String>) -> Self {
        Self::Cx(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// 3 and 4 report unusable input paths; everything else that goes
    /// wrong once the input is accepted is a layout failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotAFile { .. } => 3,
            Self::EmptyFile { .. } => 4,
            _ => 5,
        }
    }
}
