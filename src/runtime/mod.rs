//! Application runtime
//!
//! Entry points for the execution modes of the binary.

pub mod modes;

#[cfg(feature = "cli")]
pub use modes::run_cli;
#[cfg(feature = "server")]
pub use modes::run_server;
pub use modes::{Mode, detect_mode};
