//! List and show commands

use colored::Colorize;

use super::helpers::{print_link_details, status_label};
use crate::interfaces::cli::CliError;
use crate::services::LinkService;

pub fn list_links(service: &LinkService, json: bool) -> Result<(), CliError> {
    let links = service.list_links();

    if json {
        let output = serde_json::to_string_pretty(&links)
            .map_err(|e| CliError::CommandError(format!("Failed to serialize links: {}", e)))?;
        println!("{}", output);
        return Ok(());
    }

    if links.is_empty() {
        println!("{} No QR links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "QR link list:".bold().green());
    println!();
    for link in &links {
        let mut info_parts = vec![format!(
            "{} -> {}",
            link.slug.cyan(),
            link.destination_url.blue().underline()
        )];
        if link.name != link.destination_url {
            info_parts.push(format!("({})", link.name).dimmed().to_string());
        }
        if !link.is_active {
            info_parts.push(format!("[{}]", status_label(link)));
        }
        info_parts.push(link.id.dimmed().to_string());

        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} QR links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}

pub fn show_link(service: &LinkService, id: &str) -> Result<(), CliError> {
    let link = service.get_link(id)?;
    println!("{}", "QR link:".bold().green());
    print_link_details(service, &link);
    Ok(())
}
