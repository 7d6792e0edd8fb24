//! Check-in entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A timestamped attendance record against a confirmed reservation.
///
/// Append-only; a reservation may accumulate multiple check-ins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Checkin {
    /// Unique check-in identifier.
    pub id: Uuid,
    /// The attended reservation.
    pub reservation_id: Uuid,
    /// The staff member who recorded attendance.
    pub actor_id: Uuid,
    /// Optional free-form location.
    pub location: Option<String>,
    /// When attendance was recorded.
    pub created_at: DateTime<Utc>,
}
