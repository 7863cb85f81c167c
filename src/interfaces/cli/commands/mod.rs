//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config_management;
pub mod link_management;
mod qr;

pub use link_management::{
    create_link, delete_link, list_links, resolve_slug, set_link_active, show_link, update_link,
};
pub use qr::{payload, qr_svg};
