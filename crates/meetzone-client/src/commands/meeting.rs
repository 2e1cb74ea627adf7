//! One-shot `calc` and `message` commands.
//!
//! Flags take precedence over `config.toml`. Participants given with
//! `--participant` replace the configured ones entirely. A `--zone` flag is
//! checked only after the form itself passes validation, so a missing title
//! is reported before an unknown zone.

use meetzone_core::{
    ConversionSet, JsonOutput, Language, MeetingForm, Registry, ResultsLayout, calculate, generate,
    render_message, render_results,
};
use tracing::debug;

use crate::cli::MeetingArgs;
use crate::clipboard::copy_message;
use crate::config::{ClientConfig, tomorrow};
use crate::error::{ClientError, ClientResult};

/// Builds the meeting form from flags, falling back to configuration.
///
/// The base zone comes from configuration; see [`prepare`] for `--zone`.
pub fn build_form(
    args: &MeetingArgs,
    config: &ClientConfig,
    language: Option<Language>,
) -> ClientResult<MeetingForm> {
    let mut form = config.meeting_form(tomorrow()).map_err(ClientError::Config)?;

    if let Some(ref title) = args.title {
        form.title = title.clone();
    }
    if let Some(ref date) = args.date {
        form.date = Some(date.clone());
    }
    if let Some(ref time) = args.time {
        form.time = Some(time.clone());
    }
    if let Some(language) = language {
        form.language = language;
    }
    Ok(form)
}

/// Builds the participant list from flags, or from configuration when no
/// `--participant` flag is given.
pub fn build_registry(args: &MeetingArgs, config: &ClientConfig) -> ClientResult<Registry> {
    if args.participant.is_empty() {
        return config.preset_registry().map_err(ClientError::Config);
    }

    let mut registry = Registry::new();
    for (name, zone) in &args.participant {
        registry.add_named(name, zone)?;
    }
    Ok(registry)
}

/// Builds the form and registry, then applies `--zone`.
pub fn prepare(
    args: &MeetingArgs,
    config: &ClientConfig,
    language: Option<Language>,
) -> ClientResult<(MeetingForm, Registry)> {
    let mut form = build_form(args, config, language)?;
    let registry = build_registry(args, config)?;

    if let Some(ref zone) = args.zone {
        form.validate(registry.list())?;
        form.set_base_timezone(zone)?;
    }
    Ok((form, registry))
}

/// Renders the results view, or JSON.
pub fn render_calc(set: &ConversionSet, layout: ResultsLayout, json: bool) -> ClientResult<String> {
    if json {
        to_json(set)
    } else {
        Ok(render_results(set, layout))
    }
}

fn to_json(set: &ConversionSet) -> ClientResult<String> {
    serde_json::to_string_pretty(&JsonOutput::from(set))
        .map_err(|e| ClientError::Input(format!("failed to serialize output: {}", e)))
}

/// Runs `meetzone calc`.
pub fn calc(
    args: &MeetingArgs,
    config: &ClientConfig,
    layout: Option<ResultsLayout>,
    json: bool,
) -> ClientResult<()> {
    let (form, registry) = prepare(args, config, None)?;
    debug!(?form, participants = registry.len(), "calc");

    let set = calculate(&form, &registry)?;
    let layout = layout.unwrap_or(config.display.layout);
    print!("{}", render_calc(&set, layout, json)?);
    if json {
        println!();
    }
    Ok(())
}

/// Runs `meetzone message`.
pub async fn message(
    args: &MeetingArgs,
    config: &ClientConfig,
    language: Option<Language>,
    copy: bool,
    json: bool,
) -> ClientResult<()> {
    let (form, registry) = prepare(args, config, language)?;
    debug!(?form, participants = registry.len(), "message");

    let set = generate(&form, &registry)?;
    if json {
        println!("{}", to_json(&set)?);
        return Ok(());
    }

    let text = render_message(&set);
    println!("{}", text);

    if copy {
        let method = copy_message(&text).await?;
        eprintln!("{}", method.confirmation());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParticipantPreset;
    use meetzone_core::{PipelineError, ValidationError};

    fn args() -> MeetingArgs {
        MeetingArgs {
            title: Some("Sync".into()),
            date: Some("2025-11-22".into()),
            time: Some("15:00".into()),
            zone: Some("America/Buenos_Aires".into()),
            participant: vec![("Ana".into(), "America/New_York".into())],
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = ClientConfig::default();
        config.defaults.base_timezone = "Europe/Madrid".into();
        config.defaults.time = Some("09:00".into());

        let (form, _) = prepare(&args(), &config, Some(Language::En)).unwrap();
        assert_eq!(form.title, "Sync");
        assert_eq!(form.time.as_deref(), Some("15:00"));
        assert_eq!(form.base_timezone, chrono_tz::America::Buenos_Aires);
        assert_eq!(form.language, Language::En);
    }

    #[test]
    fn config_fills_missing_flags() {
        let mut config = ClientConfig::default();
        config.defaults.base_timezone = "Europe/Madrid".into();
        config.defaults.time = Some("09:00".into());
        config.defaults.language = Language::En;

        let args = MeetingArgs {
            time: None,
            zone: None,
            date: None,
            ..args()
        };
        let form = build_form(&args, &config, None).unwrap();
        assert_eq!(form.time.as_deref(), Some("09:00"));
        assert_eq!(form.base_timezone, chrono_tz::Europe::Madrid);
        assert_eq!(form.language, Language::En);
        assert_eq!(form.date, Some(tomorrow().format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn unknown_zone_flag() {
        let args = MeetingArgs {
            zone: Some("Atlantis/Capital".into()),
            ..args()
        };
        let err = prepare(&args, &ClientConfig::default(), None).unwrap_err();
        assert!(err.to_string().contains("Atlantis/Capital"));
    }

    #[test]
    fn missing_title_reported_before_unknown_zone() {
        let args = MeetingArgs {
            title: None,
            zone: Some("Atlantis/Capital".into()),
            ..args()
        };
        let err = prepare(&args, &ClientConfig::default(), None).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Pipeline(PipelineError::Validation(ValidationError::MissingTitle))
        ));
    }

    #[test]
    fn participant_flags_replace_presets() {
        let config = ClientConfig {
            participants: vec![ParticipantPreset {
                name: "Kenji".into(),
                timezone: "Asia/Tokyo".into(),
            }],
            ..Default::default()
        };
        let registry = build_registry(&args(), &config).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list()[0].name, "Ana");

        let no_flags = MeetingArgs {
            participant: vec![],
            ..args()
        };
        let registry = build_registry(&no_flags, &config).unwrap();
        assert_eq!(registry.list()[0].name, "Kenji");
    }

    #[test]
    fn blank_participant_name_rejected() {
        let args = MeetingArgs {
            participant: vec![("  ".into(), "America/New_York".into())],
            ..args()
        };
        let err = build_registry(&args, &ClientConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Pipeline(PipelineError::Validation(ValidationError::EmptyParticipantName))
        ));
    }

    #[test]
    fn no_participants_anywhere_is_validation_error() {
        let args = MeetingArgs {
            participant: vec![],
            ..args()
        };
        let config = ClientConfig::default();
        let form = build_form(&args, &config, None).unwrap();
        let registry = build_registry(&args, &config).unwrap();
        let err = generate(&form, &registry).unwrap_err();
        assert_eq!(err, PipelineError::Validation(ValidationError::NoParticipants));
    }

    #[test]
    fn calc_json() {
        let (form, registry) = prepare(&args(), &ClientConfig::default(), None).unwrap();
        let set = calculate(&form, &registry).unwrap();

        let json = render_calc(&set, ResultsLayout::Table, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["participants"][0]["local_time"], "2025-11-22T13:00:00-05:00");

        let table = render_calc(&set, ResultsLayout::Table, false).unwrap();
        assert!(table.contains("Participante"));
    }
}
