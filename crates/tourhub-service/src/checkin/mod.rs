//! On-site check-in tracking.

pub mod service;

pub use service::CheckinService;
