//! Reservation lifecycle orchestration.
//!
//! The capacity-critical paths (creation and confirmation) run inside
//! route-locked transactions in the repository; this layer adds the
//! authorization rules, notifications, audit trail, and events.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_core::events::{DomainEvent, EventPayload, ReservationEvent};
use tourhub_database::repositories::reservation::ReservationRepository;
use tourhub_database::repositories::route::RouteRepository;
use tourhub_database::repositories::user::UserRepository;
use tourhub_entity::notification::CreateNotification;
use tourhub_entity::reservation::{CreateReservation, Reservation, ReservationState};
use tourhub_entity::route::{Route, RouteState};
use tourhub_entity::user::UserRole;

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::events::EventBus;
use crate::guard::require_active_caller;
use crate::notification::NotificationService;

use super::policy;

/// Orchestrates reservation creation, transitions, and reads.
#[derive(Clone)]
pub struct ReservationService {
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// Route repository.
    route_repo: Arc<RouteRepository>,
    /// User repository, for the suspension gate.
    user_repo: Arc<UserRepository>,
    /// Notification delivery.
    notifier: Arc<NotificationService>,
    /// Audit recorder.
    audit: Arc<AuditRecorder>,
    /// Domain event bus.
    events: EventBus,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        reservation_repo: Arc<ReservationRepository>,
        route_repo: Arc<RouteRepository>,
        user_repo: Arc<UserRepository>,
        notifier: Arc<NotificationService>,
        audit: Arc<AuditRecorder>,
        events: EventBus,
    ) -> Self {
        Self {
            reservation_repo,
            route_repo,
            user_repo,
            notifier,
            audit,
            events,
        }
    }

    /// Books a pending reservation on a published route.
    ///
    /// The price per person is frozen at booking time and the total is
    /// computed server-side from it; capacity is checked against
    /// confirmed occupancy inside a route-locked transaction.
    pub async fn create_reservation(
        &self,
        ctx: &RequestContext,
        data: CreateReservation,
    ) -> Result<Reservation, AppError> {
        require_active_caller(&self.user_repo, ctx).await?;

        let route = self
            .route_repo
            .find_by_id(data.route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;
        if route.state != RouteState::Published {
            return Err(AppError::validation("Route is not open for booking"));
        }

        if data.tour_date < ctx.request_time.date_naive() {
            return Err(AppError::validation("Tour date cannot be in the past"));
        }
        if data.people_count < 1 {
            return Err(AppError::validation("At least one participant is required"));
        }

        let data = CreateReservation {
            tourist_id: ctx.user_id,
            ..data
        };
        let reservation = self.reservation_repo.create_pending(&data).await?;

        info!(
            reservation_id = %reservation.id,
            route_id = %route.id,
            people = reservation.people_count,
            "Reservation created"
        );

        self.notifier
            .notify(CreateNotification {
                user_id: route.owner_id,
                event_type: "reservation.created".to_string(),
                title: "New reservation".to_string(),
                message: format!(
                    "{} booked {} spot(s) on '{}' for {}",
                    ctx.name, reservation.people_count, route.name, reservation.tour_date
                ),
                payload: Some(json!({ "reservation_id": reservation.id })),
            })
            .await;

        self.audit
            .record(
                Some(ctx.user_id),
                "reservation.create",
                "reservation",
                Some(reservation.id),
                Some(json!({
                    "route_id": route.id,
                    "people_count": reservation.people_count,
                    "total_paid": reservation.total_paid,
                })),
            )
            .await;

        self.events.publish(DomainEvent::new(
            Some(ctx.user_id),
            EventPayload::Reservation(ReservationEvent::Created {
                reservation_id: reservation.id,
                route_id: route.id,
                people_count: reservation.people_count,
            }),
        ));

        Ok(reservation)
    }

    /// Moves a reservation to a new state on behalf of staff.
    ///
    /// Confirmation re-runs the capacity check under the route lock;
    /// cancellation demands a justification; the closed state is owned
    /// by the expiry sweep and cannot be reached here.
    pub async fn change_state(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        new_state: ReservationState,
        reason: Option<String>,
    ) -> Result<Reservation, AppError> {
        require_active_caller(&self.user_repo, ctx).await?;
        if !ctx.is_staff() {
            return Err(AppError::authorization(
                "Only staff can manage reservation state",
            ));
        }

        let reservation = self.load_reservation(reservation_id).await?;
        let route = self.load_route_for_staff(ctx, reservation.route_id).await?;

        let updated = match new_state {
            ReservationState::Confirmed => {
                reservation.state.validate_transition(new_state)?;
                self.reservation_repo.confirm(reservation.id).await?
            }
            ReservationState::Cancelled => {
                policy::validate_staff_cancellation(reservation.state, reason.as_deref())?;
                self.reservation_repo
                    .transition(reservation.id, reservation.state, ReservationState::Cancelled)
                    .await?
            }
            other => {
                return Err(AppError::invalid_transition(reservation.state, other));
            }
        };

        info!(
            reservation_id = %updated.id,
            from = %reservation.state,
            to = %updated.state,
            "Reservation state changed"
        );

        self.notify_tourist_of_transition(&updated, &route, reason.as_deref())
            .await;

        self.audit
            .record(
                Some(ctx.user_id),
                "reservation.change_state",
                "reservation",
                Some(updated.id),
                Some(json!({ "from": reservation.state, "to": updated.state, "reason": reason })),
            )
            .await;

        self.publish_transition_event(Some(ctx.user_id), &updated, reason);

        Ok(updated)
    }

    /// Cancels a reservation under the role-dependent rules.
    ///
    /// Tourists cancel their own upcoming reservations without giving a
    /// reason; staff cancel reservations on routes they own and must
    /// justify it.
    pub async fn cancel_reservation(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        reason: Option<String>,
    ) -> Result<Reservation, AppError> {
        require_active_caller(&self.user_repo, ctx).await?;

        let reservation = self.load_reservation(reservation_id).await?;
        let route = self
            .route_repo
            .find_by_id(reservation.route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;

        match ctx.role {
            UserRole::Tourist => {
                policy::validate_tourist_cancellation(
                    &reservation,
                    ctx.user_id,
                    ctx.request_time.date_naive(),
                )?;
            }
            UserRole::Host => {
                if route.owner_id != ctx.user_id {
                    return Err(AppError::authorization("You do not own this route"));
                }
                policy::validate_staff_cancellation(reservation.state, reason.as_deref())?;
            }
            UserRole::Guide | UserRole::Admin => {
                policy::validate_staff_cancellation(reservation.state, reason.as_deref())?;
            }
        }

        let cancelled = self
            .reservation_repo
            .transition(reservation.id, reservation.state, ReservationState::Cancelled)
            .await?;

        info!(reservation_id = %cancelled.id, by = %ctx.role, "Reservation cancelled");

        // Tell whichever party did not initiate the cancellation.
        if ctx.user_id == reservation.tourist_id {
            self.notifier
                .notify(CreateNotification {
                    user_id: route.owner_id,
                    event_type: "reservation.cancelled".to_string(),
                    title: "Reservation cancelled".to_string(),
                    message: format!(
                        "A reservation on '{}' for {} was cancelled by the tourist",
                        route.name, cancelled.tour_date
                    ),
                    payload: Some(json!({ "reservation_id": cancelled.id })),
                })
                .await;
        } else {
            self.notify_tourist_of_transition(&cancelled, &route, reason.as_deref())
                .await;
        }

        self.audit
            .record(
                Some(ctx.user_id),
                "reservation.cancel",
                "reservation",
                Some(cancelled.id),
                Some(json!({ "reason": reason })),
            )
            .await;

        self.publish_transition_event(Some(ctx.user_id), &cancelled, reason);

        Ok(cancelled)
    }

    /// Lists the current user's own reservations.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Reservation>, AppError> {
        self.reservation_repo.find_by_tourist(ctx.user_id).await
    }

    /// Lists reservations on one route, for its owner or an admin.
    pub async fn list_for_route(
        &self,
        ctx: &RequestContext,
        route_id: Uuid,
    ) -> Result<Vec<Reservation>, AppError> {
        self.load_route_for_staff(ctx, route_id).await?;
        self.reservation_repo.find_by_route(route_id).await
    }

    /// Lists reservations across the platform.
    ///
    /// Admins and guides see everything; hosts see reservations on their
    /// own routes.
    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Reservation>, AppError> {
        match ctx.role {
            UserRole::Admin | UserRole::Guide => self.reservation_repo.find_all().await,
            UserRole::Host => self.reservation_repo.find_by_route_owner(ctx.user_id).await,
            UserRole::Tourist => Err(AppError::authorization(
                "Only staff can list all reservations",
            )),
        }
    }

    /// Remaining bookable slots on a route: capacity minus confirmed
    /// occupancy.
    pub async fn remaining_capacity(&self, route_id: Uuid) -> Result<i64, AppError> {
        self.route_repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;
        self.reservation_repo.remaining_capacity(route_id).await
    }

    /// Closes every confirmed reservation whose end instant has passed.
    ///
    /// Called by the scheduled sweep; safe to re-run.
    pub async fn close_due_reservations(&self) -> Result<Vec<Reservation>, AppError> {
        let closed = self.reservation_repo.close_due(Utc::now()).await?;

        for reservation in &closed {
            self.events.publish(DomainEvent::new(
                None,
                EventPayload::Reservation(ReservationEvent::AutoClosed {
                    reservation_id: reservation.id,
                }),
            ));
        }

        if !closed.is_empty() {
            self.audit
                .record(
                    None,
                    "reservation.auto_close",
                    "reservation",
                    None,
                    Some(json!({ "closed": closed.len() })),
                )
                .await;
        }

        Ok(closed)
    }

    async fn load_reservation(&self, id: Uuid) -> Result<Reservation, AppError> {
        self.reservation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))
    }

    /// Loads a route, enforcing the staff rule that hosts only manage
    /// their own routes.
    async fn load_route_for_staff(
        &self,
        ctx: &RequestContext,
        route_id: Uuid,
    ) -> Result<Route, AppError> {
        if !ctx.is_staff() {
            return Err(AppError::authorization("Staff access required"));
        }

        let route = self
            .route_repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;

        if ctx.role == UserRole::Host && route.owner_id != ctx.user_id {
            return Err(AppError::authorization("You do not own this route"));
        }

        Ok(route)
    }

    async fn notify_tourist_of_transition(
        &self,
        reservation: &Reservation,
        route: &Route,
        reason: Option<&str>,
    ) {
        let (title, message) = match reservation.state {
            ReservationState::Confirmed => (
                "Reservation confirmed",
                format!(
                    "Your reservation on '{}' for {} is confirmed",
                    route.name, reservation.tour_date
                ),
            ),
            ReservationState::Cancelled => (
                "Reservation cancelled",
                match reason {
                    Some(r) => format!(
                        "Your reservation on '{}' for {} was cancelled: {r}",
                        route.name, reservation.tour_date
                    ),
                    None => format!(
                        "Your reservation on '{}' for {} was cancelled",
                        route.name, reservation.tour_date
                    ),
                },
            ),
            _ => return,
        };

        self.notifier
            .notify(CreateNotification {
                user_id: reservation.tourist_id,
                event_type: format!("reservation.{}", reservation.state),
                title: title.to_string(),
                message,
                payload: Some(json!({ "reservation_id": reservation.id })),
            })
            .await;
    }

    fn publish_transition_event(
        &self,
        actor_id: Option<Uuid>,
        reservation: &Reservation,
        reason: Option<String>,
    ) {
        let event = match reservation.state {
            ReservationState::Confirmed => ReservationEvent::Confirmed {
                reservation_id: reservation.id,
            },
            ReservationState::Cancelled => ReservationEvent::Cancelled {
                reservation_id: reservation.id,
                reason,
            },
            _ => return,
        };

        self.events
            .publish(DomainEvent::new(actor_id, EventPayload::Reservation(event)));
    }
}
