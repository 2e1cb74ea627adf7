//! Subcommand implementations.

pub mod config;
pub mod meeting;
pub mod zones;
