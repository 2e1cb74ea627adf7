//! Client error types.

use std::fmt;

use meetzone_core::{PipelineError, TimeError, ValidationError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// A calculate/generate action was rejected.
    Pipeline(PipelineError),
    /// Malformed command-line or session input.
    Input(String),
    /// Neither the system clipboard nor the terminal fallback worked.
    Clipboard(String),
    /// Logging could not be set up.
    Tracing(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Pipeline(err) => write!(f, "{}", err),
            Self::Input(msg) => write!(f, "invalid input: {}", msg),
            Self::Clipboard(msg) => write!(f, "copy failed: {}", msg),
            Self::Tracing(msg) => write!(f, "failed to initialize logging: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<PipelineError> for ClientError {
    fn from(err: PipelineError) -> Self {
        Self::Pipeline(err)
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        Self::Pipeline(err.into())
    }
}

impl From<TimeError> for ClientError {
    fn from(err: TimeError) -> Self {
        Self::Pipeline(err.into())
    }
}

impl From<meetzone_core::TracingError> for ClientError {
    fn from(err: meetzone_core::TracingError) -> Self {
        Self::Tracing(err.to_string())
    }
}
