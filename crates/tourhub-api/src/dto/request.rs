//! Request DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tourhub_entity::reservation::ReservationState;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Reservation creation body.
///
/// Any client-supplied total is deliberately absent: the server computes
/// it from the frozen per-person price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    /// The route to book.
    pub route_id: Uuid,
    /// Date of the tour.
    pub tour_date: NaiveDate,
    /// Optional start time-of-day.
    pub start_time: Option<NaiveTime>,
    /// Optional end time-of-day.
    pub end_time: Option<NaiveTime>,
    /// Headcount.
    pub people_count: i32,
}

/// Staff reservation state change body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStateRequest {
    /// Target state.
    pub state: ReservationState,
    /// Justification, required for cancellations.
    pub reason: Option<String>,
}

/// Cancellation body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelReservationRequest {
    /// Justification. Optional for tourists, mandatory for staff.
    pub reason: Option<String>,
}

/// Rating creation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRatingRequest {
    /// The rated reservation.
    pub reservation_id: Uuid,
    /// Score, 1 to 5.
    pub score: i16,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// Suspension body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspendUserRequest {
    /// Stated reason, shown to the suspended user.
    pub reason: String,
}

/// Check-in creation body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCheckinRequest {
    /// Optional free-form location.
    pub location: Option<String>,
}
