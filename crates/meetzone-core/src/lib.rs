//! Core types: participants, meeting spec, time zone conversion, message formatting

pub mod convert;
pub mod error;
pub mod format;
pub mod meeting;
pub mod participant;
pub mod time;
pub mod tracing;

pub use convert::{calculate, convert, generate, Conversion, ConversionSet};
pub use error::{PipelineError, PipelineResult, TimeError, ValidationError};
pub use format::{
    format_localized, render_english_message, render_message, render_results,
    render_spanish_message, JsonOutput, JsonParticipant, JsonTime, ResultsLayout,
};
pub use meeting::{Language, MeetingForm, MeetingSpec};
pub use participant::{Participant, ParticipantId, Registry};
pub use time::{city_label, parse_date, parse_time, parse_timezone, resolve_base, BASE_TIMEZONES};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
