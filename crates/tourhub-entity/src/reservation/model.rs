//! Reservation entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::state::ReservationState;

/// A tourist's booking against a route for a specific date and headcount.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: Uuid,
    /// The booking tourist.
    pub tourist_id: Uuid,
    /// The booked route.
    pub route_id: Uuid,
    /// Date of the tour (date-only; never in the past at creation).
    pub tour_date: NaiveDate,
    /// Optional start time-of-day.
    pub start_time: Option<NaiveTime>,
    /// Optional end time-of-day.
    pub end_time: Option<NaiveTime>,
    /// Headcount (>= 1).
    pub people_count: i32,
    /// Lifecycle state.
    pub state: ReservationState,
    /// Total charged, recomputed server-side from the frozen price.
    pub total_paid: i64,
    /// Per-person price captured at booking time; later route price
    /// changes never affect this reservation.
    pub frozen_price_per_person: i64,
    /// Set when the expiry sweep closed this reservation.
    pub auto_closed: bool,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// The UTC instant at which the booked experience ends.
    ///
    /// Uses the end time-of-day when present, otherwise the end of the
    /// tour date.
    pub fn end_instant(&self) -> DateTime<Utc> {
        let end_of_day = self
            .tour_date
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.tour_date.and_time(NaiveTime::MIN));
        match self.end_time {
            Some(time) => Utc.from_utc_datetime(&self.tour_date.and_time(time)),
            None => Utc.from_utc_datetime(&end_of_day),
        }
    }

    /// Whether the experience has concluded as of `now`.
    pub fn has_concluded(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_instant()
    }

    /// Eligibility predicate for the automatic closing sweep: a confirmed
    /// reservation whose end instant has passed.
    pub fn is_eligible_for_auto_close(&self, now: DateTime<Utc>) -> bool {
        self.state == ReservationState::Confirmed && self.has_concluded(now)
    }
}

/// Data required to create a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    /// The booking tourist.
    pub tourist_id: Uuid,
    /// The booked route.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(state: ReservationState, date: NaiveDate, end: Option<NaiveTime>) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            tourist_id: Uuid::new_v4(),
            route_id: Uuid::new_v4(),
            tour_date: date,
            start_time: None,
            end_time: end,
            people_count: 2,
            state,
            total_paid: 100,
            frozen_price_per_person: 50,
            auto_closed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_end_instant_defaults_to_end_of_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let r = reservation(ReservationState::Confirmed, date, None);
        let end = r.end_instant();
        assert_eq!(end.date_naive(), date);
        assert_eq!(end.time(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_auto_close_eligibility() {
        let yesterday = Utc::now().date_naive().pred_opt().unwrap();
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        let now = Utc::now();

        assert!(reservation(ReservationState::Confirmed, yesterday, None)
            .is_eligible_for_auto_close(now));
        assert!(!reservation(ReservationState::Confirmed, tomorrow, None)
            .is_eligible_for_auto_close(now));
        // Only confirmed reservations are swept.
        assert!(!reservation(ReservationState::Pending, yesterday, None)
            .is_eligible_for_auto_close(now));
        assert!(!reservation(ReservationState::Closed, yesterday, None)
            .is_eligible_for_auto_close(now));
    }

    #[test]
    fn test_end_time_bounds_conclusion() {
        let today = Utc::now().date_naive();
        let r = reservation(
            ReservationState::Confirmed,
            today,
            NaiveTime::from_hms_opt(0, 0, 1),
        );
        // An end time at 00:00:01 today has passed for any `now` later today.
        let later_today = Utc.from_utc_datetime(
            &today.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        );
        assert!(r.has_concluded(later_today));
    }
}
