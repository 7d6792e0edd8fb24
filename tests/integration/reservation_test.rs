//! Integration tests for the reservation capacity engine.

mod helpers;

use std::sync::Arc;

use chrono::{Days, Utc};
use tokio::task::JoinSet;

use tourhub_core::error::ErrorKind;
use tourhub_entity::reservation::{CreateReservation, ReservationState};
use tourhub_entity::route::RouteState;
use tourhub_entity::user::UserRole;

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn concurrent_bookings_never_exceed_capacity() {
    let app = Arc::new(helpers::TestApp::new().await);

    let host_id = app.create_user(UserRole::Host).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;
    let tour_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date overflow");

    let mut tourists = Vec::new();
    for _ in 0..8 {
        tourists.push(app.create_user(UserRole::Tourist).await);
    }

    let mut tasks = JoinSet::new();
    for tourist_id in tourists {
        let app = Arc::clone(&app);
        tasks.spawn(async move {
            let reservation = app
                .reservations
                .create_reservation(
                    &helpers::ctx(tourist_id, UserRole::Tourist),
                    CreateReservation {
                        tourist_id,
                        route_id,
                        tour_date,
                        start_time: None,
                        end_time: None,
                        people_count: 1,
                    },
                )
                .await?;

            app.reservations
                .change_state(
                    &helpers::ctx(host_id, UserRole::Host),
                    reservation.id,
                    ReservationState::Confirmed,
                    None,
                )
                .await
        });
    }

    let mut confirmed = 0;
    let mut rejected = 0;
    while let Some(result) = tasks.join_next().await {
        match result.expect("booking task panicked") {
            Ok(reservation) => {
                assert_eq!(reservation.state, ReservationState::Confirmed);
                confirmed += 1;
            }
            Err(e) => {
                assert_eq!(e.kind, ErrorKind::CapacityExceeded, "unexpected error: {e}");
                rejected += 1;
            }
        }
    }

    assert_eq!(confirmed, 5, "exactly capacity many bookings must win");
    assert_eq!(rejected, 3);
    assert_eq!(app.confirmed_occupancy(route_id).await, 5);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn confirmation_rechecks_capacity_for_large_groups() {
    let app = helpers::TestApp::new().await;

    let host_id = app.create_user(UserRole::Host).await;
    let tourist_id = app.create_user(UserRole::Tourist).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;
    let tour_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date overflow");

    app.seed_reservation(tourist_id, route_id, tour_date, 4, ReservationState::Confirmed)
        .await;
    let pending = app
        .seed_reservation(tourist_id, route_id, tour_date, 3, ReservationState::Pending)
        .await;

    let err = app
        .reservations
        .change_state(
            &helpers::ctx(host_id, UserRole::Host),
            pending,
            ReservationState::Confirmed,
            None,
        )
        .await
        .expect_err("confirming past capacity must fail");

    assert_eq!(err.kind, ErrorKind::CapacityExceeded);
    assert!(err.message.contains("1 slot(s) remaining"), "{}", err.message);
    assert_eq!(app.confirmed_occupancy(route_id).await, 4);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn booking_rejected_once_route_leaves_published() {
    let app = helpers::TestApp::new().await;

    let host_id = app.create_user(UserRole::Host).await;
    let tourist_id = app.create_user(UserRole::Tourist).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;
    let tour_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date overflow");

    sqlx::query("UPDATE routes SET state = 'hidden' WHERE id = $1")
        .bind(route_id)
        .execute(&app.pool)
        .await
        .expect("Failed to hide route");

    // Straight at the repository, past the service's pre-check, the way
    // a booking racing a takedown would arrive.
    let err = app
        .reservation_repo
        .create_pending(&CreateReservation {
            tourist_id,
            route_id,
            tour_date,
            start_time: None,
            end_time: None,
            people_count: 1,
        })
        .await
        .expect_err("booking a hidden route must fail");

    assert_eq!(err.kind, ErrorKind::Validation);
}
