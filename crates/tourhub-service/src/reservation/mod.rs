//! Reservation lifecycle and capacity admission.

pub mod policy;
pub mod service;

pub use service::ReservationService;
