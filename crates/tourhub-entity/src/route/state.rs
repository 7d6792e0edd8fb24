//! Route lifecycle state enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::super::user::UserRole;

/// Lifecycle state of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "route_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RouteState {
    /// Being edited by its owner; not publicly visible.
    Draft,
    /// Listed in the public catalog and bookable.
    Published,
    /// Taken down by moderation or the owner; invisible to tourists.
    Hidden,
    /// Soft-deleted; invisible to everyone but admins.
    Deleted,
}

impl RouteState {
    /// Role-scoped visibility predicate.
    ///
    /// Anonymous and tourist callers see only published routes. Hosts and
    /// guides additionally see their own routes in any non-deleted state.
    /// Admins see everything.
    pub fn visible_to(&self, caller: Option<(UserRole, bool)>) -> bool {
        match caller {
            None | Some((UserRole::Tourist, _)) => matches!(self, Self::Published),
            Some((UserRole::Admin, _)) => true,
            Some((UserRole::Host | UserRole::Guide, is_owner)) => {
                matches!(self, Self::Published) || (is_owner && !matches!(self, Self::Deleted))
            }
        }
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Hidden => "hidden",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for RouteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RouteState {
    type Err = tourhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "hidden" => Ok(Self::Hidden),
            "deleted" => Ok(Self::Deleted),
            _ => Err(tourhub_core::AppError::validation(format!(
                "Invalid route state: '{s}'. Expected one of: draft, published, hidden, deleted"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_sees_only_published() {
        assert!(RouteState::Published.visible_to(None));
        assert!(!RouteState::Draft.visible_to(None));
        assert!(!RouteState::Hidden.visible_to(None));
        assert!(!RouteState::Deleted.visible_to(None));
    }

    #[test]
    fn test_tourist_sees_only_published() {
        let tourist = Some((UserRole::Tourist, false));
        assert!(RouteState::Published.visible_to(tourist));
        assert!(!RouteState::Hidden.visible_to(tourist));
    }

    #[test]
    fn test_host_sees_own_unpublished() {
        let owner = Some((UserRole::Host, true));
        assert!(RouteState::Draft.visible_to(owner));
        assert!(RouteState::Hidden.visible_to(owner));
        assert!(!RouteState::Deleted.visible_to(owner));

        let stranger = Some((UserRole::Host, false));
        assert!(RouteState::Published.visible_to(stranger));
        assert!(!RouteState::Draft.visible_to(stranger));
    }

    #[test]
    fn test_admin_sees_everything() {
        let admin = Some((UserRole::Admin, false));
        assert!(RouteState::Draft.visible_to(admin));
        assert!(RouteState::Published.visible_to(admin));
        assert!(RouteState::Hidden.visible_to(admin));
        assert!(RouteState::Deleted.visible_to(admin));
    }
}
