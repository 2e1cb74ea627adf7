//! Error types for the conversion pipeline.
//!
//! Two families exist: [`ValidationError`] for form input that is missing or
//! malformed before any time arithmetic happens, and [`TimeError`] for a base
//! date/time that cannot be resolved in its zone. [`PipelineError`] wraps
//! both for the `calculate`/`generate` entry points.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A precondition on user input was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The meeting title is empty after trimming.
    #[error("please add a title for the meeting")]
    MissingTitle,

    /// The meeting date or time was not provided.
    #[error("please fill in the date, time and base time zone")]
    MissingDateTime,

    /// No participants are registered.
    #[error("please add at least one participant")]
    NoParticipants,

    /// A participant name is empty after trimming.
    #[error("please add a name for the participant")]
    EmptyParticipantName,

    /// The time zone identifier is not in the IANA database.
    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),

    /// The language is not one of the supported codes.
    #[error("unsupported language: {0} (expected 'es' or 'en')")]
    UnknownLanguage(String),
}

/// The base date/time could not be turned into an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Malformed date/time, or a local time skipped by a DST transition.
    #[error("the selected date and time are not valid")]
    InvalidDateTime,

    /// The base zone is not in the IANA database.
    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),
}

/// Any failure of a calculate/generate action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Time(#[from] TimeError),
}

impl PipelineError {
    /// Returns `true` if this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ValidationError::NoParticipants.to_string(),
            "please add at least one participant"
        );
        assert_eq!(
            TimeError::UnknownTimezone("Mars/Olympus".into()).to_string(),
            "unknown time zone: Mars/Olympus"
        );
    }

    #[test]
    fn pipeline_error_is_transparent() {
        let err: PipelineError = TimeError::InvalidDateTime.into();
        assert_eq!(err.to_string(), "the selected date and time are not valid");
        assert!(!err.is_validation());

        let err: PipelineError = ValidationError::MissingTitle.into();
        assert!(err.is_validation());
    }
}
