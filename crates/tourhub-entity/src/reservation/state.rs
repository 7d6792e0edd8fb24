//! Reservation state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tourhub_core::AppError;

/// Lifecycle state of a reservation.
///
/// The transition table is closed:
/// pending → {confirmed, cancelled}; confirmed → {cancelled, closed};
/// cancelled and closed are terminal. The confirmed → closed edge is
/// reserved for the automatic expiry sweep and is never reachable through
/// the management-panel transition operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationState {
    /// Awaiting host confirmation; does not hold capacity.
    Pending,
    /// Admitted against the route's capacity quota.
    Confirmed,
    /// Terminal: cancelled by the tourist or the platform.
    Cancelled,
    /// Terminal: closed automatically after the tour date passed.
    Closed,
}

impl ReservationState {
    /// Check whether a transition to `to` is permitted by the state table.
    pub fn can_transition_to(&self, to: ReservationState) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Closed)
        )
    }

    /// Validate a transition, failing with the illegal (from, to) pair.
    pub fn validate_transition(&self, to: ReservationState) -> Result<(), AppError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(AppError::invalid_transition(self, to))
        }
    }

    /// Check whether this reservation state counts against route capacity.
    pub fn holds_capacity(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ReservationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "closed" => Ok(Self::Closed),
            _ => Err(AppError::validation(format!(
                "Invalid reservation state: '{s}'. Expected one of: pending, confirmed, cancelled, closed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReservationState::*;
    use tourhub_core::error::ErrorKind;

    #[test]
    fn test_allowed_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Closed));
    }

    #[test]
    fn test_terminal_states_are_closed_under_transition() {
        for from in [Cancelled, Closed] {
            for to in [Pending, Confirmed, Cancelled, Closed] {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be illegal");
            }
        }
    }

    #[test]
    fn test_no_transition_back_to_pending() {
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn test_validate_transition_reports_pair() {
        let err = Cancelled.validate_transition(Confirmed).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
        assert!(err.message.contains("cancelled -> confirmed"));
    }

    #[test]
    fn test_only_confirmed_holds_capacity() {
        assert!(Confirmed.holds_capacity());
        assert!(!Pending.holds_capacity());
        assert!(!Cancelled.holds_capacity());
        assert!(!Closed.holds_capacity());
    }
}
