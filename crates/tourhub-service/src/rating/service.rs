//! Rating creation with eligibility rules and aggregate upkeep.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_database::repositories::rating::RatingRepository;
use tourhub_database::repositories::reservation::ReservationRepository;
use tourhub_database::repositories::route::RouteRepository;
use tourhub_database::repositories::user::UserRepository;
use tourhub_entity::notification::CreateNotification;
use tourhub_entity::rating::{self, Rating};
use tourhub_entity::reservation::ReservationState;

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::guard::require_active_caller;
use crate::notification::NotificationService;

/// Manages route ratings.
#[derive(Clone)]
pub struct RatingService {
    /// Rating repository.
    rating_repo: Arc<RatingRepository>,
    /// Reservation repository, for eligibility checks.
    reservation_repo: Arc<ReservationRepository>,
    /// Route repository.
    route_repo: Arc<RouteRepository>,
    /// User repository, for the suspension gate.
    user_repo: Arc<UserRepository>,
    /// Notification delivery.
    notifier: Arc<NotificationService>,
    /// Audit recorder.
    audit: Arc<AuditRecorder>,
}

impl RatingService {
    /// Creates a new rating service.
    pub fn new(
        rating_repo: Arc<RatingRepository>,
        reservation_repo: Arc<ReservationRepository>,
        route_repo: Arc<RouteRepository>,
        user_repo: Arc<UserRepository>,
        notifier: Arc<NotificationService>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            rating_repo,
            reservation_repo,
            route_repo,
            user_repo,
            notifier,
            audit,
        }
    }

    /// Rates a concluded reservation.
    ///
    /// The caller must own the reservation, the experience must have
    /// concluded (end instant passed, state confirmed or closed), the
    /// score must be 1..=5, and each reservation can be rated once.
    /// The route's average and review count are updated in the same
    /// transaction as the insert.
    pub async fn create_rating(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        score: i16,
        comment: Option<String>,
    ) -> Result<Rating, AppError> {
        require_active_caller(&self.user_repo, ctx).await?;

        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;

        if reservation.tourist_id != ctx.user_id {
            return Err(AppError::authorization(
                "You can only rate your own reservations",
            ));
        }

        if !rating::score_in_range(score) {
            return Err(AppError::validation(format!(
                "Score must be between {} and {}",
                rating::MIN_SCORE,
                rating::MAX_SCORE
            )));
        }

        let concluded = reservation.has_concluded(ctx.request_time)
            && matches!(
                reservation.state,
                ReservationState::Confirmed | ReservationState::Closed
            );
        if !concluded {
            return Err(AppError::validation(
                "Only concluded experiences can be rated",
            ));
        }

        if self
            .rating_repo
            .find_by_reservation(reservation.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Reservation has already been rated"));
        }

        let rating = self
            .rating_repo
            .create_and_recompute(
                reservation.id,
                ctx.user_id,
                reservation.route_id,
                score,
                comment.as_deref(),
            )
            .await?;

        info!(
            rating_id = %rating.id,
            route_id = %reservation.route_id,
            score,
            "Rating created"
        );

        if let Some(route) = self.route_repo.find_by_id(reservation.route_id).await? {
            self.notifier
                .notify(CreateNotification {
                    user_id: route.owner_id,
                    event_type: "rating.created".to_string(),
                    title: "New rating".to_string(),
                    message: format!("'{}' received a {score}-star rating", route.name),
                    payload: Some(json!({ "rating_id": rating.id, "route_id": route.id })),
                })
                .await;
        }

        self.audit
            .record(
                Some(ctx.user_id),
                "rating.create",
                "rating",
                Some(rating.id),
                Some(json!({ "reservation_id": reservation.id, "score": score })),
            )
            .await;

        Ok(rating)
    }

    /// Lists the ratings of a route, for its owner or an admin.
    pub async fn list_for_route(
        &self,
        ctx: &RequestContext,
        route_id: Uuid,
    ) -> Result<Vec<Rating>, AppError> {
        let route = self
            .route_repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;

        if !ctx.is_admin() && route.owner_id != ctx.user_id {
            return Err(AppError::authorization("You do not own this route"));
        }

        self.rating_repo.find_by_route(route_id).await
    }
}
