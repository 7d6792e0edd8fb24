//! HTTP request handlers, grouped by domain.

pub mod admin;
pub mod auth;
pub mod checkin;
pub mod health;
pub mod notification;
pub mod rating;
pub mod reservation;
pub mod route;
