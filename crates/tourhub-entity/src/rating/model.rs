//! Rating entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tourist's score for a concluded reservation.
///
/// At most one rating exists per reservation (UNIQUE constraint); ratings
/// are never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    /// Unique rating identifier.
    pub id: Uuid,
    /// The rated reservation (unique).
    pub reservation_id: Uuid,
    /// The rating tourist.
    pub tourist_id: Uuid,
    /// The rated route.
    pub route_id: Uuid,
    /// Integer score in [1, 5].
    pub score: i16,
    /// Optional free-form comment.
    pub comment: Option<String>,
    /// When the rating was created.
    pub created_at: DateTime<Utc>,
}

/// Valid score bounds.
pub const MIN_SCORE: i16 = 1;
/// Valid score bounds.
pub const MAX_SCORE: i16 = 5;

/// Check that a score lies in the valid range.
pub fn score_in_range(score: i16) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(score_in_range(1));
        assert!(score_in_range(5));
        assert!(!score_in_range(0));
        assert!(!score_in_range(6));
        assert!(!score_in_range(-1));
    }
}
