//! Pure cancellation rules, kept free of I/O so they can be tested
//! in isolation.
//!
//! Tourists may cancel their own pending or confirmed reservations as
//! long as the tour date has not passed, and owe no explanation. Staff
//! may cancel anything that is not closed but must justify it.

use chrono::NaiveDate;
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_entity::reservation::{Reservation, ReservationState};

/// Validates a tourist-initiated cancellation.
pub fn validate_tourist_cancellation(
    reservation: &Reservation,
    caller_id: Uuid,
    today: NaiveDate,
) -> Result<(), AppError> {
    if reservation.tourist_id != caller_id {
        return Err(AppError::authorization(
            "You can only cancel your own reservations",
        ));
    }

    match reservation.state {
        ReservationState::Pending | ReservationState::Confirmed => {}
        other => {
            return Err(AppError::invalid_transition(other, ReservationState::Cancelled));
        }
    }

    if reservation.tour_date < today {
        return Err(AppError::validation(
            "Past reservations can no longer be cancelled",
        ));
    }

    Ok(())
}

/// Validates a staff-initiated cancellation.
///
/// The route ownership check happens in the service; this covers the
/// state rule and the mandatory justification.
pub fn validate_staff_cancellation(
    state: ReservationState,
    reason: Option<&str>,
) -> Result<(), AppError> {
    if state == ReservationState::Closed {
        return Err(AppError::invalid_transition(state, ReservationState::Cancelled));
    }

    match reason {
        Some(r) if !r.trim().is_empty() => Ok(()),
        _ => Err(AppError::validation("Justification required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tourhub_core::error::ErrorKind;
    use uuid::Uuid;

    fn reservation(tourist_id: Uuid, state: ReservationState, date: NaiveDate) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            tourist_id,
            route_id: Uuid::new_v4(),
            tour_date: date,
            start_time: None,
            end_time: None,
            people_count: 2,
            state,
            total_paid: 100,
            frozen_price_per_person: 50,
            auto_closed: false,
            created_at: chrono::Utc::now(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tourist_may_cancel_own_pending_today() {
        let me = Uuid::new_v4();
        let r = reservation(me, ReservationState::Pending, day(2026, 3, 10));
        assert!(validate_tourist_cancellation(&r, me, day(2026, 3, 10)).is_ok());
    }

    #[test]
    fn tourist_may_not_cancel_someone_elses() {
        let r = reservation(Uuid::new_v4(), ReservationState::Pending, day(2026, 3, 10));
        let err = validate_tourist_cancellation(&r, Uuid::new_v4(), day(2026, 3, 1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn tourist_may_not_cancel_past_date() {
        let me = Uuid::new_v4();
        let r = reservation(me, ReservationState::Confirmed, day(2026, 3, 1));
        let err = validate_tourist_cancellation(&r, me, day(2026, 3, 2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn tourist_may_not_cancel_terminal_states() {
        let me = Uuid::new_v4();
        for state in [ReservationState::Cancelled, ReservationState::Closed] {
            let r = reservation(me, state, day(2026, 3, 10));
            let err = validate_tourist_cancellation(&r, me, day(2026, 3, 1)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidTransition);
        }
    }

    #[test]
    fn staff_cancellation_requires_justification() {
        let err = validate_staff_cancellation(ReservationState::Pending, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = validate_staff_cancellation(ReservationState::Pending, Some("  ")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        assert!(validate_staff_cancellation(
            ReservationState::Confirmed,
            Some("weather warning")
        )
        .is_ok());
    }

    #[test]
    fn staff_may_not_cancel_closed() {
        let err =
            validate_staff_cancellation(ReservationState::Closed, Some("too late")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }
}
