//! Update, enable and disable commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;
use crate::storage::LinkPatch;

pub fn update_link(
    service: &LinkService,
    id: &str,
    name: Option<String>,
    url: Option<String>,
    expect_version: Option<u64>,
) -> Result<(), CliError> {
    let patch = LinkPatch {
        name,
        destination_url: url,
        is_active: None,
        expected_version: expect_version,
    };
    if patch.is_empty() {
        return Err(CliError::CommandError(
            "Nothing to update: pass --name and/or --url".to_string(),
        ));
    }

    let link = service.update_link(id, patch)?;
    println!(
        "{} QR link updated: {} -> {}",
        "✓".bold().green(),
        link.slug.cyan(),
        link.destination_url.blue().underline()
    );
    println!(
        "{} Printed codes keep working, now at version {}",
        "ℹ".bold().blue(),
        link.version.to_string().yellow()
    );
    Ok(())
}

pub fn set_link_active(service: &LinkService, id: &str, is_active: bool) -> Result<(), CliError> {
    let link = service.set_active(id, is_active)?;
    if link.is_active {
        println!("{} Enabled QR link: {}", "✓".bold().green(), link.slug.cyan());
    } else {
        println!(
            "{} Disabled QR link: {} (scans now show a disabled page)",
            "✓".bold().green(),
            link.slug.cyan()
        );
    }
    Ok(())
}
