//! QR rendering commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::qr::{QrPayload, render_svg};
use crate::services::{LinkService, Resolution};
use crate::utils::is_valid_slug;

fn write_svg(svg: &str, output: Option<String>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(&path, svg)?;
            println!("{} QR image written to {}", "✓".bold().green(), path.blue());
        }
        None => println!("{}", svg),
    }
    Ok(())
}

/// 输出 slug 对应的二维码，只依赖 slug 本身
pub fn qr_svg(service: &LinkService, slug: &str, output: Option<String>) -> Result<(), CliError> {
    if !is_valid_slug(slug) {
        return Err(CliError::CommandError(format!(
            "Not a valid slug: {} (expected 6 letters or digits)",
            slug
        )));
    }
    if service.resolve(slug) == Resolution::NotFound {
        eprintln!(
            "{} No link uses slug {} yet; the code will show a not-found page",
            "⚠".bold().yellow(),
            slug.cyan()
        );
    }

    let svg = service.qr_svg(slug)?;
    if output.is_some() {
        println!(
            "{} Encoding {}",
            "ℹ".bold().blue(),
            service.qr_target(slug).magenta()
        );
    }
    write_svg(&svg, output)
}

pub fn payload(payload: QrPayload, svg: Option<String>, min_size: u32) -> Result<(), CliError> {
    let encoded = payload.encode()?;

    match svg {
        Some(path) => {
            let image = render_svg(&encoded, min_size)?;
            println!("{} {} payload:", "ℹ".bold().blue(), payload.kind().cyan());
            println!("{}", encoded);
            write_svg(&image, Some(path))
        }
        None => {
            println!("{}", encoded);
            Ok(())
        }
    }
}
