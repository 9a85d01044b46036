//! Handlers for the `/cinema/cinema_halls` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::tickets::ensure_layout_covers_sold;
use cinema_core::types::DbId;
use cinema_core::validation::{validate_hall_dimensions, validate_name};
use cinema_db::models::cinema_hall::{CinemaHall, CreateCinemaHall, UpdateCinemaHall};
use cinema_db::repositories::CinemaHallRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::middleware::rbac::{ReadAccess, WriteAccess};
use crate::state::AppState;

/// GET /api/cinema/cinema_halls/
pub async fn list_cinema_halls(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CinemaHall>>> {
    let halls = CinemaHallRepo::list(&state.pool).await?;
    Ok(Json(halls))
}

/// POST /api/cinema/cinema_halls/
pub async fn create_cinema_hall(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCinemaHall>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;
    validate_hall_dimensions(input.rows, input.seats_in_row)?;

    let hall = CinemaHallRepo::create(&state.pool, &input).await?;

    tracing::info!(
        cinema_hall_id = hall.id,
        capacity = hall.capacity,
        user_id = user.user_id,
        "Cinema hall created",
    );

    Ok((StatusCode::CREATED, Json(hall)))
}

/// GET /api/cinema/cinema_halls/{id}/
pub async fn get_cinema_hall(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<CinemaHall>> {
    let hall = CinemaHallRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("CinemaHall", id))?;
    Ok(Json(hall))
}

/// PUT /api/cinema/cinema_halls/{id}/
pub async fn replace_cinema_hall(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<CreateCinemaHall>,
) -> AppResult<Json<CinemaHall>> {
    apply_update(&state, user.user_id, id, input.into()).await
}

/// PATCH /api/cinema/cinema_halls/{id}/
pub async fn update_cinema_hall(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateCinemaHall>,
) -> AppResult<Json<CinemaHall>> {
    apply_update(&state, user.user_id, id, input).await
}

/// DELETE /api/cinema/cinema_halls/{id}/
pub async fn delete_cinema_hall(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if !CinemaHallRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("CinemaHall", id));
    }
    tracing::info!(cinema_hall_id = id, user_id = user.user_id, "Cinema hall deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &AppState,
    user_id: DbId,
    id: DbId,
    input: UpdateCinemaHall,
) -> AppResult<Json<CinemaHall>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }

    if input.rows.is_some() || input.seats_in_row.is_some() {
        let current = CinemaHallRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("CinemaHall", id))?;
        let rows = input.rows.unwrap_or(current.rows);
        let seats_in_row = input.seats_in_row.unwrap_or(current.seats_in_row);

        validate_hall_dimensions(rows, seats_in_row)?;
        let furthest_sold = CinemaHallRepo::furthest_sold_seat(&state.pool, id).await?;
        ensure_layout_covers_sold(rows, seats_in_row, furthest_sold)?;
    }

    let hall = CinemaHallRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("CinemaHall", id))?;

    tracing::info!(cinema_hall_id = id, user_id, "Cinema hall updated");

    Ok(Json(hall))
}
