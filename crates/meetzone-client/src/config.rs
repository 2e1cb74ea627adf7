//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/meetzone/config.toml` by default. Every section is optional.
//!
//! ```toml
//! [defaults]
//! base_timezone = "America/Buenos_Aires"
//! language = "es"
//! time = "15:00"
//!
//! [display]
//! layout = "table"
//!
//! [logging]
//! format = "compact"
//! filter = "meetzone=info"
//!
//! [[participants]]
//! name = "Ana"
//! timezone = "America/New_York"
//! ```

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use chrono_tz::Tz;
use meetzone_core::{
    Language, MeetingForm, Registry, ResultsLayout, TracingConfig, TracingOutputFormat,
    parse_timezone,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the meetzone client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Initial values of the meeting form.
    #[serde(default)]
    pub defaults: DefaultSettings,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Participants to start with. When empty, interactive sessions start
    /// with the two sample teams.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<ParticipantPreset>,
}

/// Initial meeting form values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// IANA identifier of the base zone.
    pub base_timezone: String,

    /// Message language.
    pub language: Language,

    /// Meeting time (`HH:MM`), if one should be prefilled.
    pub time: Option<String>,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            base_timezone: "America/Buenos_Aires".to_string(),
            language: Language::Es,
            time: None,
        }
    }
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Results view layout.
    pub layout: ResultsLayout,
}

/// Log output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Line format on stderr.
    pub format: TracingOutputFormat,

    /// Filter directive, e.g. `meetzone=info`. Takes precedence over `RUST_LOG`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// A participant listed in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPreset {
    pub name: String,
    pub timezone: String,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meetzone")
    }

    /// Parses the configured base zone.
    pub fn base_timezone(&self) -> Result<Tz, String> {
        parse_timezone(&self.defaults.base_timezone)
            .map_err(|e| format!("defaults.base_timezone: {}", e))
    }

    /// Checks every zone and time in the file.
    pub fn validate(&self) -> Result<(), String> {
        self.base_timezone()?;

        if let Some(ref time) = self.defaults.time {
            meetzone_core::parse_time(time)
                .map_err(|_| format!("defaults.time: '{}' is not HH:MM", time))?;
        }

        self.preset_registry().map(|_| ())
    }

    /// Builds a registry holding exactly the configured participants.
    pub fn preset_registry(&self) -> Result<Registry, String> {
        let mut registry = Registry::new();
        for (i, preset) in self.participants.iter().enumerate() {
            registry
                .add_named(&preset.name, &preset.timezone)
                .map_err(|e| format!("participants[{}]: {}", i, e))?;
        }
        Ok(registry)
    }

    /// Builds the registry an interactive session starts with: the
    /// configured participants, or the two sample teams if none are set.
    pub fn session_registry(&self) -> Result<Registry, String> {
        if self.participants.is_empty() {
            Ok(Registry::with_samples())
        } else {
            self.preset_registry()
        }
    }

    /// Tracing setup for this run. `format` comes from `--log-format` and
    /// wins over the file.
    pub fn tracing_config(
        &self,
        debug: bool,
        format: Option<TracingOutputFormat>,
    ) -> TracingConfig {
        let mut config = TracingConfig::cli(debug || self.debug)
            .with_format(format.unwrap_or(self.logging.format));
        if let Some(ref filter) = self.logging.filter {
            config = config.with_env_filter(filter.clone());
        }
        config
    }

    /// Builds the initial meeting form. The date defaults to `date`.
    pub fn meeting_form(&self, date: NaiveDate) -> Result<MeetingForm, String> {
        let mut form = MeetingForm::new(self.base_timezone()?, self.defaults.language);
        form.date = Some(date.format("%Y-%m-%d").to_string());
        form.time = self.defaults.time.clone();
        Ok(form)
    }
}

/// Tomorrow's date in the local zone, the form's default meeting date.
pub fn tomorrow() -> NaiveDate {
    let today = Local::now().date_naive();
    today.succ_opt().unwrap_or(today)
}
