//! Create link command

use colored::Colorize;

use super::helpers::print_link_details;
use crate::interfaces::cli::CliError;
use crate::services::{CreateLinkRequest, LinkService};

pub fn create_link(
    service: &LinkService,
    url: String,
    name: Option<String>,
) -> Result<(), CliError> {
    let link = service.create_link(CreateLinkRequest {
        name,
        destination_url: url,
    })?;

    println!(
        "{} Created QR link: {} -> {}",
        "✓".bold().green(),
        link.slug.cyan(),
        link.destination_url.blue().underline()
    );
    print_link_details(service, &link);
    Ok(())
}
