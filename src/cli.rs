//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for qryft using clap's derive macros.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::qr::{QrPayload, VCard, WifiEncryption};

/// Qryft - Dynamic QR codes with editable destinations
#[derive(Parser)]
#[command(name = "qryft")]
#[command(version)]
#[command(about = "Dynamic QR codes with editable destinations", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Create a dynamic QR link
    Create {
        /// Destination URL (https:// is added when no scheme is given)
        url: String,

        /// Display name (defaults to the destination)
        #[arg(long)]
        name: Option<String>,
    },

    /// List all links
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single link
    Show {
        /// Link id
        id: String,
    },

    /// Update name and/or destination of a link
    Update {
        /// Link id
        id: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New destination URL
        #[arg(long)]
        url: Option<String>,

        /// Reject the update unless the stored version matches
        #[arg(long)]
        expect_version: Option<u64>,
    },

    /// Re-enable a disabled link
    Enable {
        /// Link id
        id: String,
    },

    /// Disable a link without deleting it
    Disable {
        /// Link id
        id: String,
    },

    /// Delete a link
    Delete {
        /// Link id
        id: String,

        /// Reject the delete unless the stored version matches
        #[arg(long)]
        expect_version: Option<u64>,
    },

    /// Show what scanning a slug would do
    Resolve {
        /// Slug printed in the QR code
        slug: String,
    },

    /// Render the QR image for a slug as SVG
    Qr {
        /// Slug to encode
        slug: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// Build a static QR payload
    Payload {
        /// Also render the payload as SVG into this file
        #[arg(long)]
        svg: Option<String>,

        #[command(subcommand)]
        kind: PayloadCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Static payload kinds
#[derive(Subcommand)]
pub enum PayloadCommands {
    /// Plain URL
    Url { url: String },

    /// Wi-Fi network credentials
    Wifi {
        ssid: String,

        #[arg(long)]
        password: Option<String>,

        /// WPA, WEP or nopass
        #[arg(long, default_value = "WPA")]
        encryption: WifiEncryption,

        /// Network does not broadcast its SSID
        #[arg(long)]
        hidden: bool,
    },

    /// vCard 3.0 contact
    Vcard {
        first_name: String,
        last_name: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        org: Option<String>,

        #[arg(long)]
        website: Option<String>,

        #[arg(long)]
        title: Option<String>,
    },

    /// mailto: link
    Email {
        to: String,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        body: Option<String>,
    },

    /// SMS message
    Sms {
        phone: String,

        #[arg(long)]
        message: Option<String>,
    },

    /// Calendar event (times in RFC3339)
    Event {
        title: String,

        #[arg(long)]
        start: DateTime<Utc>,

        #[arg(long)]
        end: DateTime<Utc>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Geographic location
    Geo {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

impl From<PayloadCommands> for QrPayload {
    fn from(cmd: PayloadCommands) -> Self {
        match cmd {
            PayloadCommands::Url { url } => QrPayload::Url { url },
            PayloadCommands::Wifi {
                ssid,
                password,
                encryption,
                hidden,
            } => QrPayload::Wifi {
                ssid,
                password,
                encryption,
                hidden,
            },
            PayloadCommands::Vcard {
                first_name,
                last_name,
                phone,
                email,
                org,
                website,
                title,
            } => QrPayload::VCard(VCard {
                first_name,
                last_name,
                phone,
                email,
                org,
                website,
                title,
            }),
            PayloadCommands::Email { to, subject, body } => QrPayload::Email { to, subject, body },
            PayloadCommands::Sms { phone, message } => QrPayload::Sms { phone, message },
            PayloadCommands::Event {
                title,
                start,
                end,
                location,
                description,
            } => QrPayload::Event {
                title,
                start,
                end,
                location,
                description,
            },
            PayloadCommands::Geo {
                latitude,
                longitude,
            } => QrPayload::Geo {
                latitude,
                longitude,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_with_name() {
        let cli = Cli::try_parse_from(["qryft", "create", "example.com", "--name", "Menu"]).unwrap();
        match cli.command {
            Some(Commands::Create { url, name }) => {
                assert_eq!(url, "example.com");
                assert_eq!(name.as_deref(), Some("Menu"));
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["qryft", "list", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_no_command_means_serve() {
        let cli = Cli::try_parse_from(["qryft"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_payload_geo_negative() {
        let cli = Cli::try_parse_from(["qryft", "payload", "geo", "-33.8", "151.2"]).unwrap();
        let Some(Commands::Payload { kind, svg }) = cli.command else {
            panic!("expected payload");
        };
        assert!(svg.is_none());
        assert_eq!(
            QrPayload::from(kind),
            QrPayload::Geo {
                latitude: -33.8,
                longitude: 151.2
            }
        );
    }

    #[test]
    fn test_payload_wifi_encryption() {
        let cli = Cli::try_parse_from([
            "qryft",
            "payload",
            "wifi",
            "Cafe",
            "--encryption",
            "nopass",
        ])
        .unwrap();
        let Some(Commands::Payload { kind, .. }) = cli.command else {
            panic!("expected payload");
        };
        match QrPayload::from(kind) {
            QrPayload::Wifi { encryption, .. } => assert_eq!(encryption, WifiEncryption::NoPass),
            other => panic!("unexpected {:?}", other),
        }
    }
}
