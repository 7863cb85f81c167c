//! Delete link command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;

pub fn delete_link(
    service: &LinkService,
    id: &str,
    expect_version: Option<u64>,
) -> Result<(), CliError> {
    service.delete_link(id, expect_version)?;
    println!("{} Deleted QR link: {}", "✓".bold().green(), id.cyan());
    Ok(())
}
