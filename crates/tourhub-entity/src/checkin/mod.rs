//! Check-in domain entities.

pub mod model;

pub use model::Checkin;
