pub mod cinema;
pub mod health;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::openapi;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /cinema/...          catalog and orders (see [`cinema::router`])
/// /user/...            registration, tokens, profile (see [`user::router`])
/// /schema/             OpenAPI document (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(cinema::router())
        .nest("/user", user::router())
        .route("/schema/", get(openapi::schema))
}
