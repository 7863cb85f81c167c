use colored::Colorize;

use crate::services::LinkService;
use crate::storage::LinkRecord;

pub(super) fn status_label(link: &LinkRecord) -> colored::ColoredString {
    if link.is_active {
        "active".green()
    } else {
        "disabled".red()
    }
}

/// 打印单个链接的完整信息
pub(super) fn print_link_details(service: &LinkService, link: &LinkRecord) {
    println!("  {:<12} {}", "Id:".bold(), link.id.dimmed());
    println!("  {:<12} {}", "Name:".bold(), link.name);
    println!("  {:<12} {}", "Slug:".bold(), link.slug.cyan());
    println!(
        "  {:<12} {}",
        "Destination:".bold(),
        link.destination_url.blue().underline()
    );
    println!(
        "  {:<12} {}",
        "QR value:".bold(),
        service.qr_target(&link.slug).magenta()
    );
    println!("  {:<12} {}", "Status:".bold(), status_label(link));
    println!("  {:<12} {}", "Version:".bold(), link.version);
    println!(
        "  {:<12} {}",
        "Created:".bold(),
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  {:<12} {}",
        "Updated:".bold(),
        link.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
