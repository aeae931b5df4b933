//! Error types for dataset configuration and construction
//!
//! Every failure carries enough context to point at the offending field,
//! file or preset without consulting external documentation.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors that can occur while loading configs, resolving presets or
/// building datasets.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Configuration failed validation.
    #[error("Invalid dataset config: {0}")]
    Validation(#[from] ValidationError),

    /// Load or update referenced a field that is not declared.
    #[error("'{field}' is not a valid field name in DatasetConfig")]
    UnknownField { field: String },

    /// A declared field was given a value of the wrong type.
    #[error("Invalid value for '{field}': expected {expected}")]
    FieldType { field: String, expected: &'static str },

    /// The discriminator names a kind with no dataset implementation.
    #[error("'{kind}' is not a valid dataset class")]
    UnsupportedKind { kind: String },

    /// A field required by the requested operation was not provided.
    #[error("{field} must be provided")]
    MissingRequiredField { field: String },

    /// A file or directory does not exist.
    #[error("{key}={} does not exist", path.display())]
    PathNotFound { key: String, path: PathBuf },

    /// Named preset is not among the packaged presets.
    #[error("preset must be one of {available:?}, but got {preset}")]
    UnknownPreset { preset: String, available: Vec<String> },

    /// Supervised table is missing a column or has a malformed value.
    #[error("Malformed supervised file {}: {message}", path.display())]
    SupervisedFormat { path: PathBuf, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV/TSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DatasetError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Shorthand for an unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField { field: field.into() }
    }

    /// Check if this error is caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::UnknownField { .. }
                | Self::FieldType { .. }
                | Self::UnsupportedKind { .. }
                | Self::MissingRequiredField { .. }
                | Self::UnknownPreset { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E001",
            Self::UnknownField { .. } => "E002",
            Self::FieldType { .. } => "E003",
            Self::UnsupportedKind { .. } => "E010",
            Self::MissingRequiredField { .. } => "E020",
            Self::PathNotFound { .. } => "E021",
            Self::UnknownPreset { .. } => "E022",
            Self::SupervisedFormat { .. } => "E030",
            Self::Io { .. } => "E050",
            Self::Json(_) => "E051",
            Self::Csv(_) => "E052",
        }
    }
}
