mod common;

use axum::http::StatusCode;
use common::{build_test_app, expect_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = build_test_app(pool);
    let json = expect_json(get(app, "/health").await, StatusCode::OK).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_is_public(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.status(), StatusCode::OK);
}
