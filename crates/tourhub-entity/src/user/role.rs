//! User role enumeration and capability predicates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the marketplace.
///
/// Permission checks branch on these predicates rather than on raw role
/// strings, so the role → operation matrix is auditable in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Books routes; manages only their own reservations.
    Tourist,
    /// Owns routes; confirms/rejects reservations on them.
    Host,
    /// Leads tours; sees reservations and records check-ins.
    Guide,
    /// Moderates users and content.
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role may create and own routes.
    pub fn can_manage_routes(&self) -> bool {
        matches!(self, Self::Host | Self::Admin)
    }

    /// Check if this role is platform staff (may act on reservations it
    /// does not own: confirmations, cancellations on behalf of the
    /// platform, check-ins).
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Host | Self::Guide | Self::Admin)
    }

    /// Check if this role requires admin validation before being trusted.
    ///
    /// Tourists need no validation.
    pub fn requires_validation(&self) -> bool {
        matches!(self, Self::Host | Self::Guide)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tourist => "tourist",
            Self::Host => "host",
            Self::Guide => "guide",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = tourhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tourist" => Ok(Self::Tourist),
            "host" => Ok(Self::Host),
            "guide" => Ok(Self::Guide),
            "admin" => Ok(Self::Admin),
            _ => Err(tourhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: tourist, host, guide, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_matrix() {
        assert!(UserRole::Admin.can_manage_routes());
        assert!(UserRole::Host.can_manage_routes());
        assert!(!UserRole::Guide.can_manage_routes());
        assert!(!UserRole::Tourist.can_manage_routes());

        assert!(UserRole::Host.is_staff());
        assert!(UserRole::Guide.is_staff());
        assert!(!UserRole::Tourist.is_staff());
    }

    #[test]
    fn test_validation_requirement() {
        assert!(UserRole::Host.requires_validation());
        assert!(UserRole::Guide.requires_validation());
        assert!(!UserRole::Tourist.requires_validation());
        assert!(!UserRole::Admin.requires_validation());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("host".parse::<UserRole>().unwrap(), UserRole::Host);
        assert_eq!("TOURIST".parse::<UserRole>().unwrap(), UserRole::Tourist);
        assert!("viewer".parse::<UserRole>().is_err());
    }
}
