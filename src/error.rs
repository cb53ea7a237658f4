//! Error types for the capture system.
//!
//! [`CaptureError`] is what callers of the registry and the hydrator see.
//! [`ConstructError`] is the underlying cause carried by
//! [`CaptureError::CaptureFailed`]: it is produced by argument extraction and by
//! the constructors of capturable types themselves.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    #[error("Type {0} does not exist")]
    UnknownType(String),
    #[error("Type {0} is not capturable")]
    NotCapturable(String),
    #[error("Field {0} does not have a declared type")]
    MissingFieldType(String),
    #[error("Type {0} is not supported yet")]
    UnsupportedType(String),
    #[error("Source value of field {0} is not capturable")]
    NotCapturableValue(String),
    #[error("Failed to capture {type_name}")]
    CaptureFailed {
        type_name: String,
        #[source]
        source: ConstructError,
    },
    #[error("Invalid type descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CaptureError {
    pub(crate) fn capture_failed(type_name: impl Into<String>, source: ConstructError) -> Self {
        CaptureError::CaptureFailed {
            type_name: type_name.into(),
            source,
        }
    }

    /// The construction failure behind a [`CaptureError::CaptureFailed`], if any
    pub fn construct_error(&self) -> Option<&ConstructError> {
        match self {
            CaptureError::CaptureFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for CaptureError {
    fn from(error: config::ConfigError) -> Self {
        CaptureError::Configuration(error.to_string())
    }
}

/// Why a capturable type could not be instantiated from its resolved arguments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructError {
    #[error("No value supplied for field {field}")]
    MissingValue { field: String },
    #[error("Too few or too many arguments: expected {expected}, given {given}")]
    ArgumentCount { expected: usize, given: usize },
    #[error(
        "Argument #{position} (${parameter}) must be of type {expected}, {given} given"
    )]
    TypeMismatch {
        parameter: String,
        position: usize,
        expected: String,
        given: String,
    },
    #[error("Instance of {type_name} is shared and cannot be moved into a constructor")]
    SharedInstance { type_name: String },
    #[error("Type has no registered constructor")]
    MissingConstructor,
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
pub type ConstructResult<T> = std::result::Result<T, ConstructError>;
