//! Integration tests for the suspension gate.

mod helpers;

use chrono::{Days, Utc};

use tourhub_core::error::ErrorKind;
use tourhub_entity::reservation::CreateReservation;
use tourhub_entity::route::RouteState;
use tourhub_entity::user::UserRole;

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn suspension_locks_out_until_restored() {
    let app = helpers::TestApp::new().await;

    let admin_id = app.create_user(UserRole::Admin).await;
    let host_id = app.create_user(UserRole::Host).await;
    let tourist_id = app.create_user(UserRole::Tourist).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;
    let tour_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date overflow");

    app.moderation
        .suspend_user(
            &helpers::ctx(admin_id, UserRole::Admin),
            tourist_id,
            "Abusive behaviour".to_string(),
        )
        .await
        .expect("suspension must succeed");

    let booking = CreateReservation {
        tourist_id,
        route_id,
        tour_date,
        start_time: None,
        end_time: None,
        people_count: 1,
    };

    // The gate reads the live account row, so even a fresh token is
    // locked out immediately.
    let err = app
        .reservations
        .create_reservation(&helpers::ctx(tourist_id, UserRole::Tourist), booking.clone())
        .await
        .expect_err("suspended accounts cannot book");
    assert_eq!(err.kind, ErrorKind::Authorization);

    app.moderation
        .restore_user(&helpers::ctx(admin_id, UserRole::Admin), tourist_id)
        .await
        .expect("restore must succeed");

    app.reservations
        .create_reservation(&helpers::ctx(tourist_id, UserRole::Tourist), booking)
        .await
        .expect("restored accounts can book again");
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn repeated_suspension_conflicts() {
    let app = helpers::TestApp::new().await;

    let admin_id = app.create_user(UserRole::Admin).await;
    let tourist_id = app.create_user(UserRole::Tourist).await;

    app.moderation
        .suspend_user(
            &helpers::ctx(admin_id, UserRole::Admin),
            tourist_id,
            "Abusive behaviour".to_string(),
        )
        .await
        .expect("suspension must succeed");

    let err = app
        .moderation
        .suspend_user(
            &helpers::ctx(admin_id, UserRole::Admin),
            tourist_id,
            "Still abusive".to_string(),
        )
        .await
        .expect_err("suspending twice must conflict");
    assert_eq!(err.kind, ErrorKind::Conflict);
}
