//! Integration tests for route deletion guards.

mod helpers;

use chrono::{Days, Utc};

use tourhub_core::error::ErrorKind;
use tourhub_entity::reservation::ReservationState;
use tourhub_entity::route::RouteState;
use tourhub_entity::user::UserRole;

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn delete_blocked_while_reservations_active() {
    let app = helpers::TestApp::new().await;

    let host_id = app.create_user(UserRole::Host).await;
    let tourist_id = app.create_user(UserRole::Tourist).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;
    let tour_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date overflow");

    let reservation_id = app
        .seed_reservation(tourist_id, route_id, tour_date, 2, ReservationState::Pending)
        .await;

    let err = app
        .catalog
        .delete_route(&helpers::ctx(host_id, UserRole::Host), route_id)
        .await
        .expect_err("delete must be blocked by the pending reservation");
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(app.route_state(route_id).await, RouteState::Published);

    sqlx::query("UPDATE reservations SET state = 'cancelled' WHERE id = $1")
        .bind(reservation_id)
        .execute(&app.pool)
        .await
        .expect("Failed to cancel reservation");

    app.catalog
        .delete_route(&helpers::ctx(host_id, UserRole::Host), route_id)
        .await
        .expect("delete must succeed once the reservation is settled");
    assert_eq!(app.route_state(route_id).await, RouteState::Deleted);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn delete_is_not_repeatable() {
    let app = helpers::TestApp::new().await;

    let host_id = app.create_user(UserRole::Host).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;

    app.catalog
        .delete_route(&helpers::ctx(host_id, UserRole::Host), route_id)
        .await
        .expect("first delete must succeed");

    // Deleted routes vanish from the owner's view.
    let err = app
        .catalog
        .delete_route(&helpers::ctx(host_id, UserRole::Host), route_id)
        .await
        .expect_err("deleting twice must fail");
    assert_eq!(err.kind, ErrorKind::NotFound);
}
