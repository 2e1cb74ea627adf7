//! Tracing setup for meetzone
//!
//! Logs go to stderr so they never mix with a generated message on stdout.
//! The filter defaults to `meetzone=<level>`; `RUST_LOG` replaces it unless
//! an explicit filter is configured.
//!
//! # Usage
//!
//! ```ignore
//! use meetzone_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::cli(verbose).with_format(TracingOutputFormat::Json))?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt as fmt_layer,
    prelude::*,
    registry::LookupSpan,
};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse log filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("unknown log format '{0}' (expected compact, pretty or json)")]
    UnknownFormat(String),
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingOutputFormat {
    /// One line per event.
    #[default]
    Compact,
    /// Multi-line, for reading `--debug` output.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl fmt::Display for TracingOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        })
    }
}

impl FromStr for TracingOutputFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(TracingError::UnknownFormat(s.trim().to_string())),
        }
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level used for the default `meetzone=<level>` filter
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Whether to include file/line information in logs
    pub include_location: bool,
    /// Whether to include target (module path) in logs
    pub include_target: bool,
    pub include_timestamp: bool,
    /// Custom filter directive; takes precedence over `RUST_LOG`
    pub env_filter: Option<String>,
}

impl TracingConfig {
    /// Normal runs: warnings only, no timestamps or targets.
    #[must_use]
    pub fn cli_quiet() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            include_timestamp: false,
            env_filter: None,
        }
    }

    /// `--debug` runs: debug level with targets and source locations.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
            ..Self::cli_quiet()
        }
    }

    /// Picks [`cli_debug`](Self::cli_debug) or [`cli_quiet`](Self::cli_quiet).
    #[must_use]
    pub fn cli(debug: bool) -> Self {
        if debug { Self::cli_debug() } else { Self::cli_quiet() }
    }

    /// Set the output format. JSON lines always carry a timestamp.
    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        if format == TracingOutputFormat::Json {
            self.include_timestamp = true;
        }
        self
    }

    /// Set a custom filter directive such as `meetzone_core=trace`.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn filter(&self) -> Result<EnvFilter, TracingError> {
        match self.env_filter {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("meetzone={}", self.default_level)))),
        }
    }

    fn layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    {
        let layer = fmt_layer::layer::<S>()
            .with_writer(std::io::stderr)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_target(self.include_target);

        match (self.output_format, self.include_timestamp) {
            (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
            (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
            (TracingOutputFormat::Pretty, true) => layer.pretty().boxed(),
            (TracingOutputFormat::Pretty, false) => layer.pretty().without_time().boxed(),
            (TracingOutputFormat::Json, _) => layer.json().boxed(),
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set or if
/// the filter directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.filter()?;
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(config.layer());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_presets() {
        let quiet = TracingConfig::cli(false);
        assert_eq!(quiet, TracingConfig::cli_quiet());
        assert_eq!(quiet.default_level, Level::WARN);
        assert_eq!(quiet.output_format, TracingOutputFormat::Compact);
        assert!(!quiet.include_timestamp);
        assert!(!quiet.include_target);

        let debug = TracingConfig::cli(true);
        assert_eq!(debug.default_level, Level::DEBUG);
        assert!(debug.include_location);
        assert!(debug.include_target);
    }

    #[test]
    fn test_json_format_adds_timestamps() {
        let config = TracingConfig::cli_quiet().with_format(TracingOutputFormat::Json);
        assert_eq!(config.output_format, TracingOutputFormat::Json);
        assert!(config.include_timestamp);

        let config = TracingConfig::cli_quiet().with_format(TracingOutputFormat::Pretty);
        assert!(!config.include_timestamp);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<TracingOutputFormat>().unwrap(), TracingOutputFormat::Json);
        assert_eq!(
            " Pretty ".parse::<TracingOutputFormat>().unwrap(),
            TracingOutputFormat::Pretty
        );
        assert!(matches!(
            "xml".parse::<TracingOutputFormat>(),
            Err(TracingError::UnknownFormat(f)) if f == "xml"
        ));
        assert_eq!(TracingOutputFormat::default().to_string(), "compact");
    }

    #[test]
    fn test_explicit_filter() {
        let config = TracingConfig::cli_quiet().with_env_filter("meetzone_core=trace");
        assert_eq!(config.env_filter.as_deref(), Some("meetzone_core=trace"));
        assert!(config.filter().is_ok());

        let bad = TracingConfig::cli_quiet().with_env_filter("meetzone=loud");
        assert!(matches!(bad.filter(), Err(TracingError::EnvFilter(_))));
    }
}
