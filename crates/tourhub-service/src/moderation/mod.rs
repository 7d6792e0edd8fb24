//! Administrative moderation and audit access.

pub mod service;

pub use service::ModerationService;
