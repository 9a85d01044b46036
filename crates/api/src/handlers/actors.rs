//! Handlers for the `/cinema/actors` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::types::DbId;
use cinema_core::validation::validate_name;
use cinema_db::models::actor::{Actor, CreateActor, UpdateActor};
use cinema_db::repositories::ActorRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::middleware::rbac::{ReadAccess, WriteAccess};
use crate::state::AppState;

/// GET /api/cinema/actors/
pub async fn list_actors(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Actor>>> {
    let actors = ActorRepo::list(&state.pool).await?;
    Ok(Json(actors))
}

/// POST /api/cinema/actors/
pub async fn create_actor(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateActor>,
) -> AppResult<impl IntoResponse> {
    validate_name("first_name", &input.first_name)?;
    validate_name("last_name", &input.last_name)?;

    let actor = ActorRepo::create(&state.pool, &input).await?;

    tracing::info!(
        actor_id = actor.id,
        full_name = %actor.full_name,
        user_id = user.user_id,
        "Actor created",
    );

    Ok((StatusCode::CREATED, Json(actor)))
}

/// GET /api/cinema/actors/{id}/
pub async fn get_actor(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<Actor>> {
    let actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Actor", id))?;
    Ok(Json(actor))
}

/// PUT /api/cinema/actors/{id}/
pub async fn replace_actor(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<CreateActor>,
) -> AppResult<Json<Actor>> {
    apply_update(&state, user.user_id, id, input.into()).await
}

/// PATCH /api/cinema/actors/{id}/
pub async fn update_actor(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateActor>,
) -> AppResult<Json<Actor>> {
    apply_update(&state, user.user_id, id, input).await
}

/// DELETE /api/cinema/actors/{id}/
pub async fn delete_actor(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if !ActorRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Actor", id));
    }
    tracing::info!(actor_id = id, user_id = user.user_id, "Actor deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &AppState,
    user_id: DbId,
    id: DbId,
    input: UpdateActor,
) -> AppResult<Json<Actor>> {
    if let Some(first_name) = &input.first_name {
        validate_name("first_name", first_name)?;
    }
    if let Some(last_name) = &input.last_name {
        validate_name("last_name", last_name)?;
    }

    let actor = ActorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Actor", id))?;

    tracing::info!(actor_id = id, user_id, "Actor updated");

    Ok(Json(actor))
}
