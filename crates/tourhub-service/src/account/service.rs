//! Account registration, login, and profile lookup.

use std::sync::Arc;

use tracing::info;

use tourhub_auth::jwt::encoder::IssuedToken;
use tourhub_auth::{JwtEncoder, PasswordHasher};
use tourhub_core::config::AuthConfig;
use tourhub_core::error::AppError;
use tourhub_database::repositories::user::UserRepository;
use tourhub_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Minimum accepted password length.
const PASSWORD_MIN_LENGTH: usize = 8;

/// Handles registration, login, and profile access.
#[derive(Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Registration code required for admin self-registration.
    admin_registration_code: String,
}

/// Registration request data.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role. Host and guide accounts start unvalidated.
    pub role: UserRole,
    /// Admin registration code, required when requesting the admin role.
    pub admin_code: Option<String>,
}

/// A registered or authenticated user together with their token.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthenticatedUser {
    /// The user record.
    pub user: User,
    /// The issued access token.
    pub token: IssuedToken,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        auth_config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            admin_registration_code: auth_config.admin_registration_code.clone(),
        }
    }

    /// Registers a new account and issues an access token.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthenticatedUser, AppError> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        if !req.email.contains('@') || !req.email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        if req.password.len() < PASSWORD_MIN_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters long"
            )));
        }

        if req.role.is_admin() {
            let supplied = req.admin_code.as_deref().unwrap_or_default();
            if self.admin_registration_code.is_empty()
                || supplied != self.admin_registration_code
            {
                return Err(AppError::authorization("Invalid admin registration code"));
            }
        }

        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                name: req.name.trim().to_string(),
                email: req.email.trim().to_lowercase(),
                password_hash,
                role: req.role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        let token = self
            .encoder
            .generate_access_token(user.id, &user.role, &user.name)?;

        Ok(AuthenticatedUser { user, token })
    }

    /// Authenticates by email and password and issues an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid email or password"));
        }

        info!(user_id = %user.id, "User logged in");

        let token = self
            .encoder
            .generate_access_token(user.id, &user.role, &user.name)?;

        Ok(AuthenticatedUser { user, token })
    }

    /// Returns the current user's full record.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
