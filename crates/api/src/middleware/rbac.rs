//! Policy-checking extractors.
//!
//! Each extractor authenticates the caller via [`AuthUser`] and then asks
//! [`authorize`] whether the route's policy admits the requested access.
//! A missing or invalid token is 401; an authenticated caller without the
//! required privilege is 403. Place these before body extractors so the
//! permission check happens before the payload is parsed.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cinema_core::permissions::{authorize, Access, Policy};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn authorize_request(
    parts: &mut Parts,
    state: &AppState,
    policy: Policy,
    access: Access,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    authorize(Some(&user.principal()), policy, access)?;
    Ok(user)
}

/// Read access to a catalog resource: any authenticated user.
///
/// ```ignore
/// async fn list_genres(ReadAccess(_user): ReadAccess) -> AppResult<Json<Vec<Genre>>> { .. }
/// ```
pub struct ReadAccess(pub AuthUser);

impl FromRequestParts<AppState> for ReadAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize_request(
            parts,
            state,
            Policy::StaffOrAuthenticatedReadOnly,
            Access::Read,
        )
        .await
        .map(ReadAccess)
    }
}

/// Write access to a catalog resource: staff only.
pub struct WriteAccess(pub AuthUser);

impl FromRequestParts<AppState> for WriteAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize_request(
            parts,
            state,
            Policy::StaffOrAuthenticatedReadOnly,
            Access::Write,
        )
        .await
        .map(WriteAccess)
    }
}

/// Requires any authenticated user.
///
/// Used by routes whose data is scoped to the caller (orders, own profile).
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize_request(parts, state, Policy::Authenticated, Access::Write)
            .await
            .map(RequireAuth)
    }
}
