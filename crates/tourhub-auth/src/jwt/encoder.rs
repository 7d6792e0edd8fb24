//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tourhub_core::config::AuthConfig;
use tourhub_core::error::AppError;
use tourhub_entity::user::UserRole;

use super::claims::Claims;

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
}

/// Result of a successful token issuance.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IssuedToken {
    /// Signed access token.
    pub access_token: String,
    /// Access token expiration timestamp.
    pub expires_at: chrono::DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
        }
    }

    /// Generates a signed access token for the given user.
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        role: &UserRole,
        name: &str,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.access_ttl_minutes);

        let claims = Claims {
            sub: user_id,
            role: role.clone(),
            name: name.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken {
            access_token,
            expires_at: exp,
        })
    }
}
