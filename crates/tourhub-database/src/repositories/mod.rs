//! Concrete repository implementations, one per entity.

pub mod audit;
pub mod checkin;
pub mod notification;
pub mod rating;
pub mod reservation;
pub mod route;
pub mod user;
