//! Business services shared by the HTTP and CLI interfaces

pub mod link_service;

pub use link_service::{CreateLinkRequest, LinkService, Resolution};
