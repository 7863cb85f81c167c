pub mod slug;
pub mod url_validator;

pub use slug::{generate_slug, is_valid_slug};
pub use url_validator::normalize_destination;
