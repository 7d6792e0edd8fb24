//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tourhub_core::config::AuthConfig;
use tourhub_core::error::AppError;

use super::claims::Claims;

/// Validates JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                _ => AppError::authentication("Invalid token"),
            })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::super::encoder::JwtEncoder;
    use super::*;
    use tourhub_entity::user::UserRole;
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key-for-unit-tests".to_string(),
            jwt_access_ttl_minutes: 60,
            admin_registration_code: String::new(),
        }
    }

    #[test]
    fn round_trips_issued_token() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let user_id = Uuid::new_v4();
        let issued = encoder
            .generate_access_token(user_id, &UserRole::Guide, "Ana")
            .unwrap();

        let claims = decoder.decode(&issued.access_token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Guide);
        assert_eq!(claims.name, "Ana");
        assert!(!claims.is_expired());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let encoder = JwtEncoder::new(&AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..test_config()
        });
        let decoder = JwtDecoder::new(&test_config());

        let issued = encoder
            .generate_access_token(Uuid::new_v4(), &UserRole::Tourist, "Bob")
            .unwrap();

        let err = decoder.decode(&issued.access_token).unwrap_err();
        assert_eq!(err.kind, tourhub_core::error::ErrorKind::Authentication);
    }

    #[test]
    fn rejects_garbage_token() {
        let decoder = JwtDecoder::new(&test_config());
        assert!(decoder.decode("not.a.token").is_err());
    }
}
