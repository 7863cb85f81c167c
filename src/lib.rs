//! Qryft - Dynamic QR codes with editable destinations
//!
//! A QR code printed by qryft encodes a short, permanent resolution URL
//! (`<origin>/q/<slug>`). The destination behind the slug can be changed,
//! disabled or deleted at any time without reprinting the code.
//!
//! # Features
//! - **server**: HTTP resolution, QR images and management API (default)
//! - **cli**: Command-line management (default)
//!
//! # Architecture
//! - `utils`: Slug generation and destination normalization
//! - `storage`: Link store over a swappable blob backend
//! - `services`: Creation and resolution flows
//! - `qr`: Encoded target URL, SVG rendering, static payloads
//! - `api`: HTTP services
//! - `interfaces`: Command-line interface
//! - `config`: Configuration management
//! - `runtime`: Execution modes
//! - `system`: Logging

#[cfg(feature = "server")]
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod qr;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
