//! Meeting form fields and their validation.
//!
//! [`MeetingForm`] holds raw, possibly-empty field values as a user typed
//! them. [`MeetingForm::validate`] turns it into a [`MeetingSpec`] by
//! checking preconditions in a fixed order and reporting only the first
//! violation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, ValidationError};
use crate::participant::Participant;
use crate::time::{parse_date, parse_time, parse_timezone};

/// Output language of the generated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Spanish.
    #[default]
    Es,
    /// English.
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            _ => Err(ValidationError::UnknownLanguage(s.trim().to_string())),
        }
    }
}

/// A validated meeting, read fresh from the form for each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSpec {
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub base_timezone: Tz,
    pub language: Language,
}

/// Raw meeting fields as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingForm {
    pub title: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub base_timezone: Tz,
    pub language: Language,
}

impl Default for MeetingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: None,
            time: None,
            base_timezone: chrono_tz::America::Buenos_Aires,
            language: Language::default(),
        }
    }
}

impl MeetingForm {
    /// Creates a form with the given base zone and language and no other fields.
    pub fn new(base_timezone: Tz, language: Language) -> Self {
        Self {
            base_timezone,
            language,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the base zone from an IANA identifier.
    pub fn set_base_timezone(&mut self, zone: &str) -> Result<(), ValidationError> {
        self.base_timezone = parse_timezone(zone)
            .map_err(|_| ValidationError::UnknownTimezone(zone.trim().to_string()))?;
        Ok(())
    }

    /// Checks the form against the current participants.
    ///
    /// Order: title, date/time presence, participant count, date/time
    /// validity. Only the first violation is reported.
    pub fn validate(&self, participants: &[Participant]) -> Result<MeetingSpec, PipelineError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PipelineError::Validation(ValidationError::MissingTitle));
        }

        let date = non_blank(self.date.as_deref());
        let time = non_blank(self.time.as_deref());
        let (Some(date), Some(time)) = (date, time) else {
            return Err(PipelineError::Validation(ValidationError::MissingDateTime));
        };

        if participants.is_empty() {
            return Err(PipelineError::Validation(ValidationError::NoParticipants));
        }

        Ok(MeetingSpec {
            title: title.to_string(),
            date: parse_date(date)?,
            time: parse_time(time)?,
            base_timezone: self.base_timezone,
            language: self.language,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeError;
    use crate::participant::Registry;
    use chrono_tz::America;

    fn full_form() -> MeetingForm {
        MeetingForm::new(America::Buenos_Aires, Language::En)
            .with_title("Sync")
            .with_date("2025-11-22")
            .with_time("15:00")
    }

    fn one_participant() -> Registry {
        let mut registry = Registry::new();
        registry.add("Ana", America::New_York).unwrap();
        registry
    }

    #[test]
    fn language_parse() {
        assert_eq!("es".parse::<Language>().unwrap(), Language::Es);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert_eq!(
            "fr".parse::<Language>(),
            Err(ValidationError::UnknownLanguage("fr".into()))
        );
        assert_eq!(Language::default(), Language::Es);
    }

    #[test]
    fn valid_form() {
        let spec = full_form().validate(one_participant().list()).unwrap();
        assert_eq!(spec.title, "Sync");
        assert_eq!(spec.date, NaiveDate::from_ymd_opt(2025, 11, 22).unwrap());
        assert_eq!(spec.time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(spec.base_timezone, America::Buenos_Aires);
        assert_eq!(spec.language, Language::En);
    }

    #[test]
    fn title_checked_first() {
        let form = MeetingForm::new(America::Buenos_Aires, Language::Es).with_title("   ");
        let err = form.validate(&[]).unwrap_err();
        assert_eq!(err, PipelineError::Validation(ValidationError::MissingTitle));
    }

    #[test]
    fn date_time_presence_before_participants() {
        let form = full_form();
        let form = MeetingForm { time: None, ..form };
        let err = form.validate(&[]).unwrap_err();
        assert_eq!(err, PipelineError::Validation(ValidationError::MissingDateTime));

        let form = full_form().with_date("  ");
        let err = form.validate(&[]).unwrap_err();
        assert_eq!(err, PipelineError::Validation(ValidationError::MissingDateTime));
    }

    #[test]
    fn participants_before_validity() {
        let form = full_form().with_date("not-a-date");
        let err = form.validate(&[]).unwrap_err();
        assert_eq!(err, PipelineError::Validation(ValidationError::NoParticipants));
    }

    #[test]
    fn invalid_date_is_time_error() {
        let form = full_form().with_date("2025-13-01");
        let err = form.validate(one_participant().list()).unwrap_err();
        assert_eq!(err, PipelineError::Time(TimeError::InvalidDateTime));
    }

    #[test]
    fn set_base_timezone() {
        let mut form = full_form();
        form.set_base_timezone("Europe/Madrid").unwrap();
        assert_eq!(form.base_timezone, chrono_tz::Europe::Madrid);

        let err = form.set_base_timezone("Europe/Atlantis").unwrap_err();
        assert_eq!(err, ValidationError::UnknownTimezone("Europe/Atlantis".into()));
        assert_eq!(form.base_timezone, chrono_tz::Europe::Madrid);
    }
}
