//! Registration, login, and profile access.

pub mod service;

pub use service::AccountService;
