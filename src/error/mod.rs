//! Error handling for cohort auditing.

pub mod util;

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Specialized error type for cohort record processing
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// A structural field required by the operation is absent or null
    #[error("Missing required field: {field}")]
    MissingField {
        /// Dotted path of the field, e.g. `cohort.n_patients`
        field: String,
    },

    /// A field holds a value of the wrong shape
    #[error("Invalid value for {field}: {reason}")]
    DataFormat {
        /// Dotted path of the field
        field: String,
        /// What was expected and what was found
        reason: String,
    },

    /// A weighted mean was requested with a combined weight of zero
    #[error("Cannot compute weighted mean for {field}: combined weight is zero")]
    ZeroWeight {
        /// Statistic being combined
        field: String,
    },

    /// Two records use different race/ethnicity classification standards
    #[error("Race/ethnicity schema mismatch: '{first}' vs '{second}'")]
    SchemaMismatch {
        /// Schema of the first record
        first: String,
        /// Schema of the second record
        second: String,
    },

    /// Error opening, reading or writing a record file
    #[error("IO error for {}: {source}", .path.display())]
    Io {
        /// Path of the file involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuditError {
    /// Create a missing field error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a data format error
    pub fn data_format(field: impl Into<String>, expected: &str, found: impl fmt::Display) -> Self {
        Self::invalid(field, format!("expected {expected}, found {found}"))
    }

    /// Create a data format error from a deserializer message
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for cohort audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
