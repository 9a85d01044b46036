use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Account routes, mounted at `/api/user`.
///
/// ```text
/// POST         /register/           register (public)
/// POST         /token/              obtain token pair (public)
/// POST         /token/refresh/      rotate refresh token (public)
/// GET, PATCH   /me/                 own profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(users::register))
        .route("/token/", post(users::obtain_token))
        .route("/token/refresh/", post(users::refresh_token))
        .route("/me/", get(users::get_me).patch(users::update_me))
}
