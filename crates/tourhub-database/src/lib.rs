//! # tourhub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all TourHub entities. Capacity-critical
//! reservation operations run as row-locking transactions here.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
