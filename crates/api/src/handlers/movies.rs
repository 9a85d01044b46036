//! Handlers for the `/cinema/movies` resource.
//!
//! Movies can be listed, retrieved, and created. There is no update or
//! delete route; axum answers those methods with 405.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::filters::{MovieFilter, MovieQuery};
use cinema_core::types::DbId;
use cinema_core::validation::{validate_duration, validate_name};
use cinema_db::models::movie::{CreateMovie, MovieDetail, MovieListItem};
use cinema_db::repositories::{ActorRepo, GenreRepo, MovieRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::rbac::{ReadAccess, WriteAccess};
use crate::state::AppState;

/// GET /api/cinema/movies/
///
/// Supports `?title=`, `?actors=1,2`, and `?genres=1,2`; filters AND together.
pub async fn list_movies(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MovieQuery>,
) -> AppResult<Json<Vec<MovieListItem>>> {
    let filter = MovieFilter::from_query(&query)?;
    let movies = MovieRepo::list(&state.pool, &filter.predicates()).await?;
    Ok(Json(movies))
}

/// POST /api/cinema/movies/
///
/// Returns 201 with genres and actors as id lists.
pub async fn create_movie(
    WriteAccess(user): WriteAccess,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    validate_name("title", &input.title)?;
    validate_duration(input.duration)?;

    let missing_genres = GenreRepo::find_missing(&state.pool, &input.genres).await?;
    if !missing_genres.is_empty() {
        return Err(unknown_ids("genres", &missing_genres));
    }
    let missing_actors = ActorRepo::find_missing(&state.pool, &input.actors).await?;
    if !missing_actors.is_empty() {
        return Err(unknown_ids("actors", &missing_actors));
    }

    let movie = MovieRepo::create(&state.pool, &input).await?;

    tracing::info!(
        movie_id = movie.id,
        title = %movie.title,
        user_id = user.user_id,
        "Movie created",
    );

    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/cinema/movies/{id}/
///
/// Detail projection with nested genres and actors.
pub async fn get_movie(
    ReadAccess(_user): ReadAccess,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MovieDetail>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie", id))?;

    let genres = GenreRepo::list_for_movie(&state.pool, id).await?;
    let actors = ActorRepo::list_for_movie(&state.pool, id).await?;

    Ok(Json(MovieDetail::new(movie, genres, actors)))
}

fn unknown_ids(field: &str, ids: &[DbId]) -> AppError {
    let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
    AppError::Core(CoreError::Validation(format!(
        "{field}: unknown id(s) {}",
        ids.join(", ")
    )))
}
