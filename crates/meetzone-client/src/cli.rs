//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use meetzone_core::{Language, ResultsLayout, TracingOutputFormat};

/// meetzone - Share one meeting time across time zones
#[derive(Debug, Parser)]
#[command(name = "meetzone")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MEETZONE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show each participant's local time for the meeting
    Calc {
        #[command(flatten)]
        meeting: MeetingArgs,

        /// Results layout
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate the invitation message
    Message {
        #[command(flatten)]
        meeting: MeetingArgs,

        /// Message language
        #[arg(long, short, value_enum)]
        lang: Option<LanguageArg>,

        /// Copy the message to the clipboard
        #[arg(long)]
        copy: bool,

        /// Output the conversions in JSON format instead of the message
        #[arg(long, conflicts_with = "copy")]
        json: bool,
    },

    /// Edit the meeting interactively (default)
    Session {
        /// Start with no participants
        #[arg(long)]
        empty: bool,
    },

    /// List the base time zones
    Zones,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Meeting fields shared by `calc` and `message`.
#[derive(Debug, Clone, Args)]
pub struct MeetingArgs {
    /// Meeting title
    #[arg(long, short)]
    pub title: Option<String>,

    /// Meeting date (YYYY-MM-DD), defaults to tomorrow
    #[arg(long, short)]
    pub date: Option<String>,

    /// Meeting time (HH:MM) in the base zone
    #[arg(long)]
    pub time: Option<String>,

    /// Base time zone (IANA identifier)
    #[arg(long, short)]
    pub zone: Option<String>,

    /// Participant as NAME=Area/City (can be repeated)
    #[arg(long, short, value_parser = parse_participant, action = clap::ArgAction::Append)]
    pub participant: Vec<(String, String)>,
}

/// Parses `NAME=Area/City`. The zone is everything after the last `=`.
pub fn parse_participant(value: &str) -> Result<(String, String), String> {
    let (name, zone) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=Area/City, got '{}'", value))?;
    Ok((name.trim().to_string(), zone.trim().to_string()))
}

/// Message language flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LanguageArg {
    Es,
    En,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Es => Language::Es,
            LanguageArg::En => Language::En,
        }
    }
}

/// Results layout flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutArg {
    Table,
    Cards,
}

impl From<LayoutArg> for ResultsLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Table => ResultsLayout::Table,
            LayoutArg::Cards => ResultsLayout::Cards,
        }
    }
}

/// Log format flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormatArg {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormatArg> for TracingOutputFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Compact => TracingOutputFormat::Compact,
            LogFormatArg::Pretty => TracingOutputFormat::Pretty,
            LogFormatArg::Json => TracingOutputFormat::Json,
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
