//! Job implementations.

pub mod autoclose;
