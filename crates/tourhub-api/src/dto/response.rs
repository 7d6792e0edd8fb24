//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tourhub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Login/registration response.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Access token.
    pub access_token: String,
    /// Access token expiration.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user. The password hash is never serialized.
    pub user: User,
}

/// Remaining capacity of a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityResponse {
    /// Bookable slots left.
    pub remaining: i64,
}

/// Unread notification count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    /// Number of unread notifications.
    pub unread: i64,
}
