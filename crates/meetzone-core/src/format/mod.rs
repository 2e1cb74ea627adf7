//! Output formatting for converted meeting times.
//!
//! This module provides:
//! - [`format_localized`]: the fixed display pattern for each [`Language`]
//! - [`render_message`]: the shareable invitation text (Spanish or English)
//! - [`render_results`]: the on-screen results view, as a table or cards
//! - [`JsonOutput`]: machine-readable output for `--json`
//!
//! # Example
//!
//! ```rust
//! use meetzone_core::{convert, render_message, Language, MeetingSpec, Registry};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let mut registry = Registry::new();
//! registry.add("Ana", chrono_tz::America::New_York).unwrap();
//!
//! let spec = MeetingSpec {
//!     title: "Sync".to_string(),
//!     date: NaiveDate::from_ymd_opt(2025, 11, 22).unwrap(),
//!     time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
//!     base_timezone: chrono_tz::America::Buenos_Aires,
//!     language: Language::En,
//! };
//!
//! let set = convert(&spec, registry.list()).unwrap();
//! let message = render_message(&set);
//! assert!(message.contains("Saturday, November 22, 2025 – 1:00 PM"));
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Locale};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::convert::{Conversion, ConversionSet};
use crate::meeting::Language;


const SPANISH_PATTERN: &str = "%A, %-d de %B de %Y – %H:%M";
const ENGLISH_PATTERN: &str = "%A, %B %-d, %Y – %-I:%M %p";
const RULE: &str = "_____________________________________________";

/// Formats an instant in its own zone using the language's display pattern.
///
/// - `es`: `sábado, 22 de noviembre de 2025 – 15:00`
/// - `en`: `Saturday, November 22, 2025 – 3:00 PM`
pub fn format_localized(instant: &DateTime<Tz>, language: Language) -> String {
    match language {
        Language::Es => instant
            .format_localized(SPANISH_PATTERN, Locale::es_ES)
            .to_string(),
        Language::En => instant.format(ENGLISH_PATTERN).to_string(),
    }
}

/// Renders the invitation message in the set's language.
pub fn render_message(set: &ConversionSet) -> String {
    match set.language {
        Language::Es => render_spanish_message(set),
        Language::En => render_english_message(set),
    }
}

/// Renders the Spanish invitation message.
pub fn render_spanish_message(set: &ConversionSet) -> String {
    let mut message = format!(
        "Hola,\n\n\
         Te comparto los detalles de nuestra reunión: \"{}\".\n\n\
         {RULE}\n\n\
         Fecha y hora de referencia:\n\
         {}\n\
         {}\n\n\
         Horario para cada participante:\n\n",
        set.title, set.base_formatted, set.base_city
    );
    push_participants(&mut message, &set.conversions);
    let _ = write!(
        message,
        "{RULE}\n\n\
         Si ves algún error en tu horario local, por favor avísame.\n\n\
         ¡Nos vemos en la reunión!"
    );
    message
}

/// Renders the English invitation message.
pub fn render_english_message(set: &ConversionSet) -> String {
    let mut message = format!(
        "Hi,\n\n\
         Here are the details for our meeting: \"{}\".\n\n\
         {RULE}\n\n\
         Reference date and time:\n\
         {}\n\
         {}\n\n\
         Local time for each participant:\n\n",
        set.title, set.base_formatted, set.base_city
    );
    push_participants(&mut message, &set.conversions);
    let _ = write!(
        message,
        "{RULE}\n\n\
         If you notice any issue with your local time, please let me know.\n\n\
         Looking forward to our meeting!"
    );
    message
}

fn push_participants(message: &mut String, conversions: &[Conversion]) {
    for conv in conversions {
        let _ = write!(
            message,
            "- {}\n  {}\n  {}\n\n",
            conv.participant.name, conv.formatted, conv.city
        );
    }
}

/// Layout of the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsLayout {
    /// Aligned columns (wide terminals).
    #[default]
    Table,
    /// One block per participant (narrow terminals).
    Cards,
}

/// Renders the results view: the base time header followed by every
/// participant's local time.
pub fn render_results(set: &ConversionSet, layout: ResultsLayout) -> String {
    let mut out = format!(
        "Hora base: {} ({})\n\n",
        set.base_formatted, set.base_city
    );
    match layout {
        ResultsLayout::Table => push_table(&mut out, &set.conversions),
        ResultsLayout::Cards => push_cards(&mut out, &set.conversions),
    }
    out
}

fn push_table(out: &mut String, conversions: &[Conversion]) {
    const HEADERS: [&str; 3] = ["Participante", "Ubicación", "Hora local"];

    let name_width = column_width(
        HEADERS[0],
        conversions.iter().map(|c| c.participant.name.as_str()),
    );
    let city_width = column_width(HEADERS[1], conversions.iter().map(|c| c.city.as_str()));
    let time_width = column_width(HEADERS[2], conversions.iter().map(|c| c.formatted.as_str()));

    let _ = writeln!(
        out,
        "{:<name_width$}  {:<city_width$}  {}",
        HEADERS[0], HEADERS[1], HEADERS[2]
    );
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(name_width),
        "-".repeat(city_width),
        "-".repeat(time_width)
    );
    for conv in conversions {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<city_width$}  {}",
            conv.participant.name, conv.city, conv.formatted
        );
    }
}

fn push_cards(out: &mut String, conversions: &[Conversion]) {
    for (i, conv) in conversions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} · {}", conv.participant.name, conv.city);
        let _ = writeln!(out, "  {}", conv.formatted);
    }
}

/// Width in characters of the widest cell, header included.
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub title: String,
    pub language: Language,
    pub base: JsonTime,
    pub participants: Vec<JsonParticipant>,
    /// Number of participants converted.
    pub count: usize,
}

/// A zoned instant in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTime {
    pub timezone: String,
    pub city: String,
    /// RFC 3339 timestamp with the zone's offset.
    pub local_time: String,
    pub formatted: String,
}

/// A single participant's conversion in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonParticipant {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub time: JsonTime,
}

impl From<&ConversionSet> for JsonOutput {
    fn from(set: &ConversionSet) -> Self {
        let participants: Vec<JsonParticipant> = set
            .conversions
            .iter()
            .map(|conv| JsonParticipant {
                id: conv.participant.id.get(),
                name: conv.participant.name.clone(),
                time: JsonTime {
                    timezone: conv.participant.timezone_name().to_string(),
                    city: conv.city.clone(),
                    local_time: conv.local.to_rfc3339(),
                    formatted: conv.formatted.clone(),
                },
            })
            .collect();

        Self {
            title: set.title.clone(),
            language: set.language,
            base: JsonTime {
                timezone: set.base.timezone().name().to_string(),
                city: set.base_city.clone(),
                local_time: set.base.to_rfc3339(),
                formatted: set.base_formatted.clone(),
            },
            count: participants.len(),
            participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::{America, Europe};

    fn at(tz: Tz, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        tz.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    mod localized {
        use super::*;

        #[test]
        fn spanish_24_hour() {
            let dt = at(America::Buenos_Aires, 2025, 11, 22, 15, 0);
            assert_eq!(
                format_localized(&dt, Language::Es),
                "sábado, 22 de noviembre de 2025 – 15:00"
            );
        }

        #[test]
        fn spanish_accents_and_single_digit_day() {
            let dt = at(Europe::Madrid, 2025, 1, 1, 9, 5);
            assert_eq!(
                format_localized(&dt, Language::Es),
                "miércoles, 1 de enero de 2025 – 09:05"
            );
        }

        #[test]
        fn english_12_hour() {
            let dt = at(America::Buenos_Aires, 2025, 11, 22, 15, 0);
            assert_eq!(
                format_localized(&dt, Language::En),
                "Saturday, November 22, 2025 – 3:00 PM"
            );
        }

        #[test]
        fn english_midnight_and_morning() {
            let dt = at(America::New_York, 2025, 3, 3, 0, 30);
            assert_eq!(
                format_localized(&dt, Language::En),
                "Monday, March 3, 2025 – 12:30 AM"
            );
            let dt = at(America::New_York, 2025, 3, 3, 9, 45);
            assert_eq!(
                format_localized(&dt, Language::En),
                "Monday, March 3, 2025 – 9:45 AM"
            );
        }
    }

    #[test]
    fn column_width_counts_chars() {
        assert_eq!(column_width("Ubicación", ["Tokyo"].into_iter()), 9);
        assert_eq!(column_width("x", ["Zürich"].into_iter()), 6);
    }
}
