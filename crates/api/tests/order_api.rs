//! HTTP-level integration tests for `/api/cinema/orders/`.
//!
//! Each test gets a fresh database from `#[sqlx::test]` (needs `DATABASE_URL`).

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use cinema_db::models::cinema_hall::CreateCinemaHall;
use cinema_db::models::movie::CreateMovie;
use cinema_db::models::movie_session::{CreateMovieSession, MovieSession};
use cinema_db::repositories::{CinemaHallRepo, MovieRepo, MovieSessionRepo};
use common::{
    body_json, build_test_app, create_user, expect_json, get_auth, patch_json_auth, post_json_auth,
};
use serde_json::{json, Value};
use sqlx::PgPool;

/// A session in a 2 x 3 hall.
async fn seed_session(pool: &PgPool) -> MovieSession {
    let hall = CinemaHallRepo::create(
        pool,
        &CreateCinemaHall {
            name: "Small".into(),
            rows: 2,
            seats_in_row: 3,
        },
    )
    .await
    .expect("hall creation should succeed");
    let movie = MovieRepo::create(
        pool,
        &CreateMovie {
            title: "Feature".into(),
            description: String::new(),
            duration: 120,
            genres: vec![],
            actors: vec![],
        },
    )
    .await
    .expect("movie creation should succeed");
    MovieSessionRepo::create(
        pool,
        &CreateMovieSession {
            show_time: Utc::now(),
            movie: movie.id,
            cinema_hall: hall.id,
        },
    )
    .await
    .expect("session creation should succeed")
}

fn order_body(session_id: i64, seats: &[(i32, i32)]) -> Value {
    let tickets: Vec<Value> = seats
        .iter()
        .map(|(row, seat)| json!({ "row": row, "seat": seat, "movie_session": session_id }))
        .collect();
    json!({ "tickets": tickets })
}

async fn tickets_available(pool: &PgPool, token: &str, session_id: i64) -> i64 {
    let app = build_test_app(pool.clone());
    let json = expect_json(
        get_auth(app, "/api/cinema/movie_sessions/", token).await,
        StatusCode::OK,
    )
    .await;
    json.as_array()
        .and_then(|sessions| sessions.iter().find(|s| s["id"] == session_id))
        .and_then(|s| s["tickets_available"].as_i64())
        .expect("session should be listed")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_order_reduces_availability(pool: PgPool) {
    let (_user, token) = create_user(&pool, "buyer@test.com", false).await;
    let session = seed_session(&pool).await;
    assert_eq!(tickets_available(&pool, &token, session.id).await, 6);

    let app = build_test_app(pool.clone());
    let json = expect_json(
        post_json_auth(
            app,
            "/api/cinema/orders/",
            &token,
            order_body(session.id, &[(1, 1), (1, 2)]),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    assert!(json["id"].is_i64());
    assert!(json["created_at"].is_string());
    let tickets = json["tickets"].as_array().expect("tickets array");
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0]["row"], 1);
    assert_eq!(tickets[0]["movie_session"]["id"], session.id);
    assert_eq!(tickets[0]["movie_session"]["movie_title"], "Feature");

    assert_eq!(tickets_available(&pool, &token, session.id).await, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_taken_seat_is_conflict_and_nothing_persists(pool: PgPool) {
    let (_first, first_token) = create_user(&pool, "first@test.com", false).await;
    let (_second, second_token) = create_user(&pool, "second@test.com", false).await;
    let session = seed_session(&pool).await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/cinema/orders/",
        &first_token,
        order_body(session.id, &[(2, 2)]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // (2, 3) is free but (2, 2) is taken, so the whole order fails.
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/cinema/orders/",
        &second_token,
        order_body(session.id, &[(2, 3), (2, 2)]),
    )
    .await;
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");

    assert_eq!(tickets_available(&pool, &second_token, session.id).await, 5);

    let app = build_test_app(pool);
    let json = expect_json(
        get_auth(app, "/api/cinema/orders/", &second_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_outside_hall_is_400(pool: PgPool) {
    let (_user, token) = create_user(&pool, "buyer@test.com", false).await;
    let session = seed_session(&pool).await;

    for seats in [[(3, 1)], [(1, 4)], [(0, 1)]] {
        let app = build_test_app(pool.clone());
        let response =
            post_json_auth(app, "/api/cinema/orders/", &token, order_body(session.id, &seats))
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "seats {seats:?}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_session_is_400(pool: PgPool) {
    let (_user, token) = create_user(&pool, "buyer@test.com", false).await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/cinema/orders/",
        &token,
        order_body(999999, &[(1, 1)]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_orders_are_scoped_to_owner(pool: PgPool) {
    let (_owner, owner_token) = create_user(&pool, "owner@test.com", false).await;
    let (_other, other_token) = create_user(&pool, "other@test.com", false).await;
    let session = seed_session(&pool).await;

    let app = build_test_app(pool.clone());
    let created = expect_json(
        post_json_auth(
            app,
            "/api/cinema/orders/",
            &owner_token,
            order_body(session.id, &[(1, 1)]),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let uri = format!("/api/cinema/orders/{}/", created["id"]);

    let app = build_test_app(pool.clone());
    let response = get_auth(app, &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], created["id"]);

    let app = build_test_app(pool.clone());
    let response = get_auth(app, &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = build_test_app(pool);
    let json = expect_json(
        get_auth(app, "/api/cinema/orders/", &other_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["count"], 0);
    assert_eq!(json["results"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_order_list_is_paginated_newest_first(pool: PgPool) {
    let (_user, token) = create_user(&pool, "buyer@test.com", false).await;
    let session = seed_session(&pool).await;

    let mut order_ids = Vec::new();
    for seat in 1..=3 {
        let app = build_test_app(pool.clone());
        let created = expect_json(
            post_json_auth(
                app,
                "/api/cinema/orders/",
                &token,
                order_body(session.id, &[(1, seat)]),
            )
            .await,
            StatusCode::CREATED,
        )
        .await;
        order_ids.push(created["id"].as_i64().expect("order id"));
    }

    let app = build_test_app(pool.clone());
    let page_one = expect_json(
        get_auth(app, "/api/cinema/orders/?page=1&page_size=2", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(page_one["count"], 3);
    assert_eq!(page_one["page"], 1);
    assert_eq!(page_one["page_size"], 2);
    assert_eq!(page_one["results"][0]["id"], order_ids[2]);
    assert_eq!(page_one["results"][1]["id"], order_ids[1]);

    let app = build_test_app(pool);
    let page_two = expect_json(
        get_auth(app, "/api/cinema/orders/?page=2&page_size=2", &token).await,
        StatusCode::OK,
    )
    .await;
    let results = page_two["results"].as_array().expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], order_ids[0]);
}

async fn place_order(pool: &PgPool, token: &str, session_id: i64, seats: &[(i32, i32)]) {
    let app = build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/cinema/orders/", token, order_body(session_id, seats)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hall_cannot_shrink_below_sold_seats(pool: PgPool) {
    let (_buyer, buyer_token) = create_user(&pool, "buyer@test.com", false).await;
    let (_staff, staff_token) = create_user(&pool, "staff@test.com", true).await;
    let session = seed_session(&pool).await;
    place_order(&pool, &buyer_token, session.id, &[(2, 3), (2, 2)]).await;

    let uri = format!("/api/cinema/cinema_halls/{}/", session.cinema_hall_id);
    for body in [
        json!({ "rows": 1, "seats_in_row": 1 }),
        json!({ "rows": 1 }),
        json!({ "seats_in_row": 2 }),
    ] {
        let app = build_test_app(pool.clone());
        let response = patch_json_auth(app, &uri, &staff_token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(tickets_available(&pool, &buyer_token, session.id).await, 4);

    // Growing the hall, or renaming it, is still allowed.
    let app = build_test_app(pool.clone());
    let json = expect_json(
        patch_json_auth(app, &uri, &staff_token, json!({ "rows": 3 })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["capacity"], 9);

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(app, &uri, &staff_token, json!({ "name": "Renamed" })).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_cannot_move_to_hall_smaller_than_sold_seats(pool: PgPool) {
    let (_buyer, buyer_token) = create_user(&pool, "buyer@test.com", false).await;
    let (_staff, staff_token) = create_user(&pool, "staff@test.com", true).await;
    let session = seed_session(&pool).await;
    place_order(&pool, &buyer_token, session.id, &[(2, 3)]).await;

    let tiny = CinemaHallRepo::create(
        &pool,
        &CreateCinemaHall {
            name: "Tiny".into(),
            rows: 1,
            seats_in_row: 1,
        },
    )
    .await
    .expect("hall creation should succeed");
    let large = CinemaHallRepo::create(
        &pool,
        &CreateCinemaHall {
            name: "Large".into(),
            rows: 10,
            seats_in_row: 10,
        },
    )
    .await
    .expect("hall creation should succeed");

    let uri = format!("/api/cinema/movie_sessions/{}/", session.id);

    let app = build_test_app(pool.clone());
    let response =
        patch_json_auth(app, &uri, &staff_token, json!({ "cinema_hall": tiny.id })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = build_test_app(pool.clone());
    let json = expect_json(
        patch_json_auth(app, &uri, &staff_token, json!({ "cinema_hall": large.id })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["cinema_hall"], large.id);
}
