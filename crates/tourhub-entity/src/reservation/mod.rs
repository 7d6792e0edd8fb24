//! Reservation domain entities and state machine.

pub mod model;
pub mod state;

pub use model::{CreateReservation, Reservation};
pub use state::ReservationState;
