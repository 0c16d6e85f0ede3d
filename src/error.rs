//! Error types for the reorder planner

use thiserror::Error;

/// Main error type for the reorder planner crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no numeric demand series found in dataset")]
    NoDemandSeries,

    #[error("demand column '{column}' has no usable observations")]
    EmptyDemandSeries { column: String },

    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("malformed dataset: {message}")]
    Dataset { message: String },

    #[error("interpretation failed: {message}")]
    Interpretation { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// True for failures caused by absent or unusable demand data.
    ///
    /// These are surfaced to the caller as-is and never retried.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::NoDemandSeries | Self::EmptyDemandSeries { .. })
    }
}

/// Result alias for the reorder planner crate
pub type Result<T> = std::result::Result<T, Error>;
