//! Conversion of the base meeting instant into each participant's zone.

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::error::{PipelineResult, TimeError};
use crate::format::format_localized;
use crate::meeting::{Language, MeetingForm, MeetingSpec};
use crate::participant::{Participant, Registry};
use crate::time::{city_label, resolve_base};

/// One participant's view of the meeting instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub participant: Participant,
    /// The base instant reprojected into the participant's zone.
    pub local: DateTime<Tz>,
    pub formatted: String,
    pub city: String,
}

/// The result of a calculate or generate action.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSet {
    pub title: String,
    pub base: DateTime<Tz>,
    pub base_formatted: String,
    pub base_city: String,
    pub language: Language,
    /// One entry per participant, in registry order.
    pub conversions: Vec<Conversion>,
}

impl ConversionSet {
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

/// Resolves the base instant and reprojects it into every participant's zone.
///
/// Either every participant gets a conversion or the whole call fails.
pub fn convert(
    spec: &MeetingSpec,
    participants: &[Participant],
) -> Result<ConversionSet, TimeError> {
    let base = resolve_base(spec.date, spec.time, spec.base_timezone)?;
    let language = spec.language;

    let conversions: Vec<Conversion> = participants
        .iter()
        .map(|participant| {
            let local = base.with_timezone(&participant.timezone);
            Conversion {
                participant: participant.clone(),
                formatted: format_localized(&local, language),
                city: city_label(participant.timezone_name()),
                local,
            }
        })
        .collect();

    debug!(count = conversions.len(), %language, "converted participants");

    Ok(ConversionSet {
        title: spec.title.clone(),
        base_formatted: format_localized(&base, language),
        base_city: city_label(spec.base_timezone.name()),
        base,
        language,
        conversions,
    })
}

/// Validates the form and computes conversions for the results view.
///
/// The results view is always rendered in Spanish regardless of the
/// language selected for the message.
pub fn calculate(form: &MeetingForm, registry: &Registry) -> PipelineResult<ConversionSet> {
    let mut spec = form.validate(registry.list())?;
    spec.language = Language::Es;
    let set = convert(&spec, registry.list())?;
    info!(title = %set.title, participants = set.len(), "calculated time zones");
    Ok(set)
}

/// Validates the form and computes conversions in the form's language, ready
/// for message rendering.
pub fn generate(form: &MeetingForm, registry: &Registry) -> PipelineResult<ConversionSet> {
    let spec = form.validate(registry.list())?;
    let set = convert(&spec, registry.list())?;
    info!(
        title = %set.title,
        participants = set.len(),
        language = %set.language,
        "generated conversions for message"
    );
    Ok(set)
}
