//! Integration tests for rating eligibility and aggregates.

mod helpers;

use chrono::{Days, Utc};

use tourhub_core::error::ErrorKind;
use tourhub_entity::reservation::ReservationState;
use tourhub_entity::route::RouteState;
use tourhub_entity::user::UserRole;

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn each_reservation_rated_at_most_once() {
    let app = helpers::TestApp::new().await;

    let host_id = app.create_user(UserRole::Host).await;
    let tourist_id = app.create_user(UserRole::Tourist).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;
    let past_date = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(3))
        .expect("date underflow");

    let reservation_id = app
        .seed_reservation(tourist_id, route_id, past_date, 2, ReservationState::Closed)
        .await;

    let rating = app
        .ratings
        .create_rating(
            &helpers::ctx(tourist_id, UserRole::Tourist),
            reservation_id,
            5,
            Some("Wonderful trip".to_string()),
        )
        .await
        .expect("first rating must succeed");
    assert_eq!(rating.score, 5);

    let (avg, count): (f64, i32) =
        sqlx::query_as("SELECT rating, review_count FROM routes WHERE id = $1")
            .bind(route_id)
            .fetch_one(&app.pool)
            .await
            .expect("Failed to read route aggregate");
    assert_eq!(avg, 5.0);
    assert_eq!(count, 1);

    let err = app
        .ratings
        .create_rating(
            &helpers::ctx(tourist_id, UserRole::Tourist),
            reservation_id,
            4,
            None,
        )
        .await
        .expect_err("second rating must be rejected");
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn unconcluded_reservation_cannot_be_rated() {
    let app = helpers::TestApp::new().await;

    let host_id = app.create_user(UserRole::Host).await;
    let tourist_id = app.create_user(UserRole::Tourist).await;
    let route_id = app.create_route(host_id, 5, RouteState::Published).await;
    let future_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date overflow");

    let reservation_id = app
        .seed_reservation(tourist_id, route_id, future_date, 1, ReservationState::Confirmed)
        .await;

    let err = app
        .ratings
        .create_rating(
            &helpers::ctx(tourist_id, UserRole::Tourist),
            reservation_id,
            5,
            None,
        )
        .await
        .expect_err("rating an upcoming tour must fail");
    assert_eq!(err.kind, ErrorKind::Validation);
}
