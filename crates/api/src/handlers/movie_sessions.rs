//! Handlers for the `/cinema/movie_sessions` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::filters::{MovieSessionFilter, MovieSessionQuery};
use cinema_core::tickets::ensure_layout_covers_sold;
use cinema_core::types::DbId;
use cinema_db::models::cinema_hall::CinemaHall;
use cinema_db::models::movie_session::{
    CreateMovieSession, MovieSession, MovieSessionDetail, MovieSessionListItem, UpdateMovieSession,
};
use cinema_db::repositories::{CinemaHallRepo, MovieRepo, MovieSessionRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::rbac::{ReadAccess, WriteAccess};
use crate::state::AppState;

/// GET /api/cinema/movie_sessions/
///
/// Supports `?date=YYYY-MM-DD` and `?movie=1,2`.
pub async fn list_movie_sessions(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MovieSessionQuery>,
) -> AppResult<Json<Vec<MovieSessionListItem>>> {
    let filter = MovieSessionFilter::from_query(&query)?;
    let sessions = MovieSessionRepo::list(&state.pool, &filter.predicates()).await?;
    Ok(Json(sessions))
}

/// POST /api/cinema/movie_sessions/
pub async fn create_movie_session(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMovieSession>,
) -> AppResult<impl IntoResponse> {
    ensure_references(&state, Some(input.movie), Some(input.cinema_hall)).await?;

    let session = MovieSessionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        movie_session_id = session.id,
        movie_id = session.movie_id,
        cinema_hall_id = session.cinema_hall_id,
        user_id = user.user_id,
        "Movie session created",
    );

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/cinema/movie_sessions/{id}/
///
/// Detail projection: the movie, the hall, and the seats already taken.
pub async fn get_movie_session(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MovieSessionDetail>> {
    let session = MovieSessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("MovieSession", id))?;

    let movie = MovieRepo::find_list_item(&state.pool, session.movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie", session.movie_id))?;
    let cinema_hall = CinemaHallRepo::find_by_id(&state.pool, session.cinema_hall_id)
        .await?
        .ok_or_else(|| AppError::not_found("CinemaHall", session.cinema_hall_id))?;
    let taken_places = MovieSessionRepo::taken_places(&state.pool, id).await?;

    Ok(Json(MovieSessionDetail {
        id: session.id,
        show_time: session.show_time,
        movie,
        cinema_hall,
        taken_places,
    }))
}

/// PUT /api/cinema/movie_sessions/{id}/
pub async fn replace_movie_session(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<CreateMovieSession>,
) -> AppResult<Json<MovieSession>> {
    apply_update(&state, user.user_id, id, input.into()).await
}

/// PATCH /api/cinema/movie_sessions/{id}/
pub async fn update_movie_session(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateMovieSession>,
) -> AppResult<Json<MovieSession>> {
    apply_update(&state, user.user_id, id, input).await
}

/// DELETE /api/cinema/movie_sessions/{id}/
pub async fn delete_movie_session(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if !MovieSessionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("MovieSession", id));
    }
    tracing::info!(movie_session_id = id, user_id = user.user_id, "Movie session deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &AppState,
    user_id: DbId,
    id: DbId,
    input: UpdateMovieSession,
) -> AppResult<Json<MovieSession>> {
    let new_hall = ensure_references(state, input.movie, input.cinema_hall).await?;

    if let Some(hall) = new_hall {
        let furthest_sold = MovieSessionRepo::furthest_sold_seat(&state.pool, id).await?;
        ensure_layout_covers_sold(hall.rows, hall.seats_in_row, furthest_sold)?;
    }

    let session = MovieSessionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("MovieSession", id))?;

    tracing::info!(movie_session_id = id, user_id, "Movie session updated");

    Ok(Json(session))
}

/// Reject a payload that points at a movie or hall that does not exist.
/// Returns the referenced hall, if the payload names one.
async fn ensure_references(
    state: &AppState,
    movie: Option<DbId>,
    cinema_hall: Option<DbId>,
) -> AppResult<Option<CinemaHall>> {
    if let Some(movie_id) = movie {
        if MovieRepo::find_by_id(&state.pool, movie_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "movie: no movie with id {movie_id}"
            )));
        }
    }
    let Some(hall_id) = cinema_hall else {
        return Ok(None);
    };
    let hall = CinemaHallRepo::find_by_id(&state.pool, hall_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("cinema_hall: no cinema hall with id {hall_id}"))
        })?;
    Ok(Some(hall))
}
