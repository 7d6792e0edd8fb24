//! Recording tourist arrivals on the day of the tour.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_database::repositories::checkin::CheckinRepository;
use tourhub_database::repositories::reservation::ReservationRepository;
use tourhub_database::repositories::route::RouteRepository;
use tourhub_database::repositories::user::UserRepository;
use tourhub_entity::checkin::Checkin;
use tourhub_entity::reservation::ReservationState;
use tourhub_entity::user::UserRole;

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::guard::require_active_caller;

/// Records and lists reservation check-ins.
#[derive(Debug, Clone)]
pub struct CheckinService {
    /// Check-in repository.
    checkin_repo: Arc<CheckinRepository>,
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// Route repository, for the host ownership rule.
    route_repo: Arc<RouteRepository>,
    /// User repository, for the suspension gate.
    user_repo: Arc<UserRepository>,
    /// Audit recorder.
    audit: Arc<AuditRecorder>,
}

impl CheckinService {
    /// Creates a new check-in service.
    pub fn new(
        checkin_repo: Arc<CheckinRepository>,
        reservation_repo: Arc<ReservationRepository>,
        route_repo: Arc<RouteRepository>,
        user_repo: Arc<UserRepository>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            checkin_repo,
            reservation_repo,
            route_repo,
            user_repo,
            audit,
        }
    }

    /// Records a check-in against a confirmed reservation.
    pub async fn create_checkin(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        location: Option<String>,
    ) -> Result<Checkin, AppError> {
        require_active_caller(&self.user_repo, ctx).await?;
        if !ctx.is_staff() {
            return Err(AppError::authorization("Only staff can record check-ins"));
        }

        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;

        if ctx.role == UserRole::Host {
            let route = self
                .route_repo
                .find_by_id(reservation.route_id)
                .await?
                .ok_or_else(|| AppError::not_found("Route not found"))?;
            if route.owner_id != ctx.user_id {
                return Err(AppError::authorization("You do not own this route"));
            }
        }

        if reservation.state != ReservationState::Confirmed {
            return Err(AppError::validation(
                "Check-in only on confirmed reservations",
            ));
        }

        let checkin = self
            .checkin_repo
            .create(reservation.id, ctx.user_id, location.as_deref())
            .await?;

        info!(checkin_id = %checkin.id, %reservation_id, "Check-in recorded");

        self.audit
            .record(
                Some(ctx.user_id),
                "checkin.create",
                "reservation",
                Some(reservation.id),
                Some(json!({ "location": checkin.location })),
            )
            .await;

        Ok(checkin)
    }

    /// Lists a reservation's check-ins, oldest first.
    pub async fn list_checkins(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
    ) -> Result<Vec<Checkin>, AppError> {
        if !ctx.is_staff() {
            return Err(AppError::authorization("Staff access required"));
        }

        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;

        if ctx.role == UserRole::Host {
            let route = self
                .route_repo
                .find_by_id(reservation.route_id)
                .await?
                .ok_or_else(|| AppError::not_found("Route not found"))?;
            if route.owner_id != ctx.user_id {
                return Err(AppError::authorization("You do not own this route"));
            }
        }

        self.checkin_repo.find_by_reservation(reservation_id).await
    }
}
