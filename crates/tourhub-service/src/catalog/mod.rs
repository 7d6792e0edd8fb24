//! Route catalog management.

pub mod service;

pub use service::CatalogService;
