//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives in `tourhub-core` next to `AppError`
//! (coherence requires it in the defining crate); this module re-exports
//! the response body type so API consumers keep the same path.

pub use tourhub_core::error::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use tourhub_core::error::AppError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn maps_domain_kinds_to_statuses() {
        assert_eq!(status_of(AppError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::authentication("x")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::authorization("x")), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::conflict("x")), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::capacity_exceeded(3)), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::invalid_transition("closed", "confirmed")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::internal("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
