//! Route ratings.

pub mod service;

pub use service::RatingService;
