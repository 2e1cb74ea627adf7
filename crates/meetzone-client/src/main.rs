//! meetzone CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use meetzone_client::cli::{Cli, Command, ConfigAction};
use meetzone_client::commands;
use meetzone_client::config::{ClientConfig, tomorrow};
use meetzone_client::error::{ClientError, ClientResult};
use meetzone_client::session::{self, Session};
use meetzone_core::{Registry, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    init_tracing(config.tracing_config(cli.debug, cli.log_format.map(Into::into)))?;

    match cli.command {
        Some(Command::Calc {
            meeting,
            layout,
            json,
        }) => commands::meeting::calc(&meeting, &config, layout.map(Into::into), json),
        Some(Command::Message {
            meeting,
            lang,
            copy,
            json,
        }) => commands::meeting::message(&meeting, &config, lang.map(Into::into), copy, json).await,
        Some(Command::Zones) => commands::zones::list(),
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
        Some(Command::Session { empty }) => start_session(&config, empty).await,
        None => start_session(&config, false).await,
    }
}

async fn start_session(config: &ClientConfig, empty: bool) -> ClientResult<()> {
    let registry = if empty {
        Registry::new()
    } else {
        config.session_registry().map_err(ClientError::Config)?
    };
    let form = config.meeting_form(tomorrow()).map_err(ClientError::Config)?;
    session::run(Session::new(registry, form, config.display.layout)).await
}
