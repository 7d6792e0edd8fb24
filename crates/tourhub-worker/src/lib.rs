//! Scheduled background tasks for TourHub.
//!
//! The only periodic task today is the reservation expiry sweep, which
//! closes confirmed reservations whose tour has ended.

pub mod jobs;
pub mod scheduler;

pub use scheduler::CronScheduler;
