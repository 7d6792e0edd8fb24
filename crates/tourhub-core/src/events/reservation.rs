//! Reservation-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by reservation engine transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReservationEvent {
    /// A new reservation was created.
    Created {
        /// The reservation.
        reservation_id: Uuid,
        /// The booked route.
        route_id: Uuid,
        /// Headcount requested.
        people_count: i32,
    },
    /// A pending reservation was confirmed.
    Confirmed {
        /// The reservation.
        reservation_id: Uuid,
    },
    /// A reservation was cancelled.
    Cancelled {
        /// The reservation.
        reservation_id: Uuid,
        /// Justification, when the cancelling party must provide one.
        reason: Option<String>,
    },
    /// A past-dated confirmed reservation was closed by the sweep.
    AutoClosed {
        /// The reservation.
        reservation_id: Uuid,
    },
}
