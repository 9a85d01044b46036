//! Handlers for the `/user` resource: registration, token issue and
//! refresh, and the caller's own profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use cinema_core::error::CoreError;
use cinema_core::types::DbId;
use cinema_core::validation::{normalize_email, validate_email, MAX_NAME_LENGTH};
use cinema_db::models::session::CreateSession;
use cinema_db::models::user::{CreateUser, UpdateUser, UserResponse};
use cinema_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/register/`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request body for `POST /user/token/`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /user/token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Request body for `PATCH /user/me/`. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Token pair returned by token issue and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/user/register/
///
/// Public. Creates a regular (non-staff) account.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;
    validate_optional_name("first_name", &input.first_name)?;
    validate_optional_name("last_name", &input.last_name)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with email '{email}' already exists"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            is_staff: false,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/user/token/
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn obtain_token(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response = issue_tokens(&state, user.id, user.is_staff).await?;

    tracing::info!(user_id = user.id, "Token issued");

    Ok(Json(response))
}

/// POST /api/user/token/refresh/
///
/// Exchange a valid refresh token for a new token pair. The presented
/// refresh token is revoked.
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token_hash = hash_refresh_token(&input.refresh);

    let session = SessionRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = issue_tokens(&state, user.id, user.is_staff).await?;

    Ok(Json(response))
}

/// GET /api/user/me/
pub async fn get_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let found = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", user.user_id))?;
    Ok(Json(found.into()))
}

/// PATCH /api/user/me/
pub async fn update_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let email = input.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        validate_email(email)?;
        if let Some(existing) = UserRepo::find_by_email(&state.pool, email).await? {
            if existing.id != user.user_id {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "A user with email '{email}' already exists"
                ))));
            }
        }
    }
    if let Some(first_name) = &input.first_name {
        validate_optional_name("first_name", first_name)?;
    }
    if let Some(last_name) = &input.last_name {
        validate_optional_name("last_name", last_name)?;
    }

    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(AppError::BadRequest)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let update = UpdateUser {
        email,
        first_name: input.first_name.map(|s| s.trim().to_string()),
        last_name: input.last_name.map(|s| s.trim().to_string()),
        password_hash,
    };

    let updated = UserRepo::update(&state.pool, user.user_id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("User", user.user_id))?;

    if update.password_hash.is_some() {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
        tracing::info!(user_id = user.user_id, revoked, "Password changed, sessions revoked");
    }

    tracing::info!(user_id = user.user_id, "Profile updated");

    Ok(Json(updated.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens and persist a session row for the refresh token.
async fn issue_tokens(state: &AppState, user_id: DbId, is_staff: bool) -> AppResult<TokenResponse> {
    let access = generate_access_token(user_id, is_staff, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at = Utc::now() + state.config.jwt.refresh_ttl();

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(TokenResponse {
        access,
        refresh: refresh_plaintext,
        expires_in: state.config.jwt.access_ttl().num_seconds(),
    })
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}

/// Names on the profile may be blank but are bounded like other names.
fn validate_optional_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}
