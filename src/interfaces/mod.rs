//! User interfaces
//!
//! The HTTP surface lives in `api`; this module hosts the terminal one.

#[cfg(feature = "cli")]
pub mod cli;
