//! Resolve command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{LinkService, Resolution};
use crate::utils::is_valid_slug;

pub fn resolve_slug(service: &LinkService, slug: &str) -> Result<(), CliError> {
    if !is_valid_slug(slug) {
        println!("{} Not a valid slug: {}", "✗".bold().red(), slug.yellow());
        return Ok(());
    }

    match service.resolve(slug) {
        Resolution::Redirect(target) => println!(
            "{} {} redirects to {}",
            "→".bold().green(),
            slug.cyan(),
            target.blue().underline()
        ),
        Resolution::Disabled => println!(
            "{} {} is disabled (Link Disabled page)",
            "⏸".bold().yellow(),
            slug.cyan()
        ),
        Resolution::NotFound => println!(
            "{} {} not found (QR Code Not Found page)",
            "✗".bold().red(),
            slug.cyan()
        ),
    }
    Ok(())
}
