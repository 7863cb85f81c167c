use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use qryft::cli::Cli;
use qryft::config::{LoggingConfig, init_config};
use qryft::runtime::{Mode, detect_mode};
use qryft::system::init_logging;

#[cfg(feature = "cli")]
/// 管理命令的输出面向终端，只保留警告以上的日志
fn cli_logging(config: &LoggingConfig) -> LoggingConfig {
    LoggingConfig {
        level: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        ..config.clone()
    }
}

#[actix_web::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());
    let mode = detect_mode(cli.command.as_ref());

    let logging = match mode {
        #[cfg(feature = "cli")]
        Mode::Cli => cli_logging(&config.logging),
        _ => config.logging.clone(),
    };
    let _guard = init_logging(&logging)?;
    debug!("Running in {:?} mode", mode);

    match mode {
        #[cfg(feature = "server")]
        Mode::Server => {
            qryft::runtime::run_server(&config).await?;
            Ok(ExitCode::SUCCESS)
        }

        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(cmd) = cli.command else {
                return Ok(ExitCode::SUCCESS);
            };
            match qryft::runtime::run_cli(cmd, &config) {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Mode::Unknown => {
            eprintln!("No execution mode available: rebuild with the `server` or `cli` feature");
            Ok(ExitCode::FAILURE)
        }
    }
}
