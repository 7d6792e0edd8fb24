//! Caller loading and suspension gate shared by mutating operations.

use tourhub_core::error::AppError;
use tourhub_database::repositories::user::UserRepository;
use tourhub_entity::user::User;

use crate::context::RequestContext;

/// Loads the calling user and rejects suspended accounts.
///
/// Every mutating service operation goes through this gate before
/// touching domain state, so a suspension takes effect on the very
/// next request regardless of how old the caller's token is.
pub async fn require_active_caller(
    user_repo: &UserRepository,
    ctx: &RequestContext,
) -> Result<User, AppError> {
    let user = user_repo
        .find_by_id(ctx.user_id)
        .await?
        .ok_or_else(|| AppError::authentication("Unknown user"))?;

    if user.is_suspended() {
        return Err(AppError::authorization("Account suspended"));
    }

    Ok(user)
}
