//! Link management commands
//!
//! This module provides CLI commands for managing dynamic QR links.

mod create;
mod delete;
mod helpers;
mod list;
mod resolve;
mod update;

pub use create::create_link;
pub use delete::delete_link;
pub use list::{list_links, show_link};
pub use resolve::resolve_slug;
pub use update::{set_link_active, update_link};
