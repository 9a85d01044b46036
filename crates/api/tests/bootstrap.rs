//! Staff account seeding at startup.
//!
//! Each test gets a fresh database from `#[sqlx::test]` (needs `DATABASE_URL`).

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use cinema_api::bootstrap::{seed_staff_user, SeedOutcome, StaffSeed};
use common::{build_test_app, create_user, expect_json, post_json, post_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

fn seed(email: &str, password: &str) -> StaffSeed {
    StaffSeed {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_staff_can_write_catalog(pool: PgPool) {
    let outcome = seed_staff_user(&pool, &seed(" Admin@Cinema.com ", "admin-pass"))
        .await
        .expect("seeding should succeed");
    assert_matches!(outcome, SeedOutcome::Created(_));

    let app = build_test_app(pool.clone());
    let body = json!({ "email": "admin@cinema.com", "password": "admin-pass" });
    let tokens = expect_json(post_json(app, "/api/user/token/", body).await, StatusCode::OK).await;
    let access = tokens["access"].as_str().expect("access token").to_string();

    let app = build_test_app(pool);
    let response = post_json_auth(app, "/api/cinema/genres/", &access, json!({ "name": "Drama" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeding_twice_is_a_noop(pool: PgPool) {
    let first = seed_staff_user(&pool, &seed("admin@cinema.com", "admin-pass"))
        .await
        .expect("seeding should succeed");
    let second = seed_staff_user(&pool, &seed("admin@cinema.com", "admin-pass"))
        .await
        .expect("seeding should succeed");

    let SeedOutcome::Created(id) = first else {
        panic!("first seed should create, got {first:?}");
    };
    assert_eq!(second, SeedOutcome::AlreadyStaff(id));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .expect("count should succeed");
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_user_is_promoted_and_keeps_password(pool: PgPool) {
    let (user, _token) = create_user(&pool, "viewer@test.com", false).await;

    let outcome = seed_staff_user(&pool, &seed("viewer@test.com", "a-different-password"))
        .await
        .expect("seeding should succeed");
    assert_eq!(outcome, SeedOutcome::Promoted(user.id));

    let app = build_test_app(pool);
    let body = json!({ "email": "viewer@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/user/token/", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_rejects_weak_password(pool: PgPool) {
    let result = seed_staff_user(&pool, &seed("admin@cinema.com", "abc")).await;
    assert!(result.is_err());
}
