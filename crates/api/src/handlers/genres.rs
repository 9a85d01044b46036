//! Handlers for the `/cinema/genres` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::types::DbId;
use cinema_core::validation::validate_name;
use cinema_db::models::genre::{CreateGenre, Genre, UpdateGenre};
use cinema_db::repositories::GenreRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::middleware::rbac::{ReadAccess, WriteAccess};
use crate::state::AppState;

/// GET /api/cinema/genres/
pub async fn list_genres(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Genre>>> {
    let genres = GenreRepo::list(&state.pool).await?;
    Ok(Json(genres))
}

/// POST /api/cinema/genres/
pub async fn create_genre(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateGenre>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;

    let genre = GenreRepo::create(&state.pool, &input).await?;

    tracing::info!(genre_id = genre.id, name = %genre.name, user_id = user.user_id, "Genre created");

    Ok((StatusCode::CREATED, Json(genre)))
}

/// GET /api/cinema/genres/{id}/
pub async fn get_genre(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<Genre>> {
    let genre = GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Genre", id))?;
    Ok(Json(genre))
}

/// PUT /api/cinema/genres/{id}/
pub async fn replace_genre(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<CreateGenre>,
) -> AppResult<Json<Genre>> {
    apply_update(&state, user.user_id, id, input.into()).await
}

/// PATCH /api/cinema/genres/{id}/
pub async fn update_genre(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateGenre>,
) -> AppResult<Json<Genre>> {
    apply_update(&state, user.user_id, id, input).await
}

/// DELETE /api/cinema/genres/{id}/
pub async fn delete_genre(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if !GenreRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Genre", id));
    }
    tracing::info!(genre_id = id, user_id = user.user_id, "Genre deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &AppState,
    user_id: DbId,
    id: DbId,
    input: UpdateGenre,
) -> AppResult<Json<Genre>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }

    let genre = GenreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Genre", id))?;

    tracing::info!(genre_id = id, user_id, "Genre updated");

    Ok(Json(genre))
}
