//! CLI interface module
//!
//! This module provides command-line interface functionality for qryft.
//! Every command works directly against the configured link storage.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::QryftError;
use crate::services::LinkService;
use crate::storage::StorageFactory;
use commands::{
    config_management, create_link, delete_link, list_links, payload, qr_svg, resolve_slug,
    set_link_active, show_link, update_link,
};

#[derive(Debug)]
pub enum CliError {
    /// Failure reported by the link service or storage
    ServiceError(QryftError),
    IoError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ServiceError(err) => err.format_simple(),
            CliError::IoError(msg) => format!("I/O error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ServiceError(err) => err.format_colored(),
            CliError::IoError(msg) => format!("{} {}", "I/O error:".red().bold(), msg.white()),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<QryftError> for CliError {
    fn from(err: QryftError) -> Self {
        CliError::ServiceError(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // Config commands don't need storage
    if let Commands::Config { action } = cmd {
        return match action {
            ConfigCommands::Generate { output_path, force } => {
                config_management::config_generate(output_path, force)
            }
            ConfigCommands::Show => config_management::config_show(config),
        };
    }

    // Static payloads never touch storage either
    if let Commands::Payload { svg, kind } = cmd {
        return payload(kind.into(), svg, config.qr.svg_min_size);
    }

    let store = StorageFactory::create(&config.storage)?;
    let service = LinkService::new(store, config);

    match cmd {
        Commands::Create { url, name } => create_link(&service, url, name),
        Commands::List { json } => list_links(&service, json),
        Commands::Show { id } => show_link(&service, &id),
        Commands::Update {
            id,
            name,
            url,
            expect_version,
        } => update_link(&service, &id, name, url, expect_version),
        Commands::Enable { id } => set_link_active(&service, &id, true),
        Commands::Disable { id } => set_link_active(&service, &id, false),
        Commands::Delete { id, expect_version } => delete_link(&service, &id, expect_version),
        Commands::Resolve { slug } => resolve_slug(&service, &slug),
        Commands::Qr { slug, output } => qr_svg(&service, &slug, output),

        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server runtime".to_string(),
        )),
        Commands::Payload { .. } | Commands::Config { .. } => unreachable!("handled above"),
    }
}
