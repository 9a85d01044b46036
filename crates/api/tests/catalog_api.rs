//! HTTP-level integration tests for genres, actors, and cinema halls.
//!
//! Each test gets a fresh database from `#[sqlx::test]` (needs `DATABASE_URL`).

mod common;

use axum::http::StatusCode;
use common::{
    build_test_app, create_user, delete_auth, expect_json, get_auth, patch_json_auth,
    post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_genre_crud_lifecycle(pool: PgPool) {
    let (_staff, token) = create_user(&pool, "staff@test.com", true).await;

    let app = build_test_app(pool.clone());
    let created = expect_json(
        post_json_auth(app, "/api/cinema/genres/", &token, json!({ "name": "Drama" })).await,
        StatusCode::CREATED,
    )
    .await;
    let id = created["id"].as_i64().expect("id should be an integer");
    assert_eq!(created["name"], "Drama");
    let uri = format!("/api/cinema/genres/{id}/");

    let app = build_test_app(pool.clone());
    let replaced = expect_json(
        put_json_auth(app, &uri, &token, json!({ "name": "Thriller" })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(replaced["name"], "Thriller");

    let app = build_test_app(pool.clone());
    let listed = expect_json(
        get_auth(app, "/api/cinema/genres/", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed, json!([{ "id": id, "name": "Thriller" }]));

    let app = build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = build_test_app(pool);
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_genre_name_is_conflict(pool: PgPool) {
    let (_staff, token) = create_user(&pool, "staff@test.com", true).await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/cinema/genres/", &token, json!({ "name": "Drama" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = build_test_app(pool);
    let response = post_json_auth(app, "/api/cinema/genres/", &token, json!({ "name": "Drama" })).await;
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_requires_full_body(pool: PgPool) {
    let (_staff, token) = create_user(&pool, "staff@test.com", true).await;

    let app = build_test_app(pool.clone());
    let created = expect_json(
        post_json_auth(app, "/api/cinema/genres/", &token, json!({ "name": "Drama" })).await,
        StatusCode::CREATED,
    )
    .await;
    let uri = format!("/api/cinema/genres/{}/", created["id"]);

    let app = build_test_app(pool);
    let response = put_json_auth(app, &uri, &token, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_actor_full_name_and_partial_update(pool: PgPool) {
    let (_staff, token) = create_user(&pool, "staff@test.com", true).await;

    let app = build_test_app(pool.clone());
    let created = expect_json(
        post_json_auth(
            app,
            "/api/cinema/actors/",
            &token,
            json!({ "first_name": "Keanu", "last_name": "Reeves" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["full_name"], "Keanu Reeves");
    let uri = format!("/api/cinema/actors/{}/", created["id"]);

    let app = build_test_app(pool);
    let patched = expect_json(
        patch_json_auth(app, &uri, &token, json!({ "first_name": "Carrie-Anne" })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(patched["first_name"], "Carrie-Anne");
    assert_eq!(patched["last_name"], "Reeves");
    assert_eq!(patched["full_name"], "Carrie-Anne Reeves");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_staff_can_read_actors(pool: PgPool) {
    let (_user, token) = create_user(&pool, "viewer@test.com", false).await;

    let app = build_test_app(pool);
    let json = expect_json(
        get_auth(app, "/api/cinema/actors/", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json, json!([]));
}

// ---------------------------------------------------------------------------
// Cinema halls
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cinema_hall_capacity(pool: PgPool) {
    let (_staff, token) = create_user(&pool, "staff@test.com", true).await;

    let app = build_test_app(pool.clone());
    let created = expect_json(
        post_json_auth(
            app,
            "/api/cinema/cinema_halls/",
            &token,
            json!({ "name": "Blue", "rows": 10, "seats_in_row": 12 }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["capacity"], 120);
    let uri = format!("/api/cinema/cinema_halls/{}/", created["id"]);

    let app = build_test_app(pool);
    let patched = expect_json(
        patch_json_auth(app, &uri, &token, json!({ "rows": 5 })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(patched["rows"], 5);
    assert_eq!(patched["seats_in_row"], 12);
    assert_eq!(patched["capacity"], 60);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_hall_is_404(pool: PgPool) {
    let (_staff, token) = create_user(&pool, "staff@test.com", true).await;

    let app = build_test_app(pool);
    let response = patch_json_auth(
        app,
        "/api/cinema/cinema_halls/999999/",
        &token,
        json!({ "name": "Ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
