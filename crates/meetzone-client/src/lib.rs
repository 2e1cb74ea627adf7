//! CLI, interactive session, configuration, clipboard
//!
//! This crate provides the `meetzone` command-line interface.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use session::Session;
