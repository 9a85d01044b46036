//! Repository for the `movie_sessions` table.

use cinema_core::filters::MovieSessionPredicate;
use cinema_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::movie_session::{
    CreateMovieSession, MovieSession, MovieSessionListItem, SeatLayout, TakenPlace,
    UpdateMovieSession,
};

const COLUMNS: &str = "id, show_time, movie_id, cinema_hall_id";

/// List projection columns. Expects aliases `ms`, `m`, `ch`.
pub(crate) const LIST_COLUMNS: &str = "\
    ms.id, ms.show_time, m.title AS movie_title, ch.name AS cinema_hall_name, \
    (ch.rows::BIGINT * ch.seats_in_row::BIGINT) AS cinema_hall_capacity, \
    (ch.rows::BIGINT * ch.seats_in_row::BIGINT \
        - (SELECT COUNT(*) FROM tickets t WHERE t.movie_session_id = ms.id)) AS tickets_available";

/// Joins backing [`LIST_COLUMNS`].
pub(crate) const LIST_FROM: &str = "\
    movie_sessions ms \
    JOIN movies m ON m.id = ms.movie_id \
    JOIN cinema_halls ch ON ch.id = ms.cinema_hall_id";

/// Provides data access for movie sessions.
pub struct MovieSessionRepo;

impl MovieSessionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMovieSession,
    ) -> Result<MovieSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_sessions (show_time, movie_id, cinema_hall_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieSession>(&query)
            .bind(input.show_time)
            .bind(input.movie)
            .bind(input.cinema_hall)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MovieSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movie_sessions WHERE id = $1");
        sqlx::query_as::<_, MovieSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sessions matching every predicate, ordered by show time then id.
    pub async fn list(
        pool: &PgPool,
        predicates: &[MovieSessionPredicate],
    ) -> Result<Vec<MovieSessionListItem>, sqlx::Error> {
        let mut builder = list_query(predicates);
        builder
            .build_query_as::<MovieSessionListItem>()
            .fetch_all(pool)
            .await
    }

    /// Highest row and highest seat sold for the session, if any.
    pub async fn furthest_sold_seat(
        pool: &PgPool,
        movie_session_id: DbId,
    ) -> Result<Option<(i32, i32)>, sqlx::Error> {
        let (max_row, max_seat) = sqlx::query_as::<_, (Option<i32>, Option<i32>)>(
            "SELECT MAX(seat_row), MAX(seat) FROM tickets WHERE movie_session_id = $1",
        )
        .bind(movie_session_id)
        .fetch_one(pool)
        .await?;
        Ok(max_row.zip(max_seat))
    }

    /// Seats already sold for a session, ordered by row then seat.
    pub async fn taken_places(
        pool: &PgPool,
        movie_session_id: DbId,
    ) -> Result<Vec<TakenPlace>, sqlx::Error> {
        sqlx::query_as::<_, TakenPlace>(
            "SELECT seat_row, seat FROM tickets \
             WHERE movie_session_id = $1 \
             ORDER BY seat_row, seat",
        )
        .bind(movie_session_id)
        .fetch_all(pool)
        .await
    }

    /// Hall dimensions for each of the given sessions. Unknown ids are
    /// simply absent from the result.
    pub async fn seat_layouts(
        pool: &PgPool,
        movie_session_ids: &[DbId],
    ) -> Result<Vec<SeatLayout>, sqlx::Error> {
        sqlx::query_as::<_, SeatLayout>(
            "SELECT ms.id AS movie_session_id, ch.rows, ch.seats_in_row \
             FROM movie_sessions ms \
             JOIN cinema_halls ch ON ch.id = ms.cinema_hall_id \
             WHERE ms.id = ANY($1)",
        )
        .bind(movie_session_ids)
        .fetch_all(pool)
        .await
    }

    /// Update a session. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovieSession,
    ) -> Result<Option<MovieSession>, sqlx::Error> {
        let query = format!(
            "UPDATE movie_sessions SET \
                 show_time = COALESCE($2, show_time), \
                 movie_id = COALESCE($3, movie_id), \
                 cinema_hall_id = COALESCE($4, cinema_hall_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieSession>(&query)
            .bind(id)
            .bind(input.show_time)
            .bind(input.movie)
            .bind(input.cinema_hall)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn list_query(predicates: &[MovieSessionPredicate]) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::<Postgres>::new(format!("SELECT {LIST_COLUMNS} FROM {LIST_FROM} WHERE TRUE"));

    for predicate in predicates {
        match predicate {
            MovieSessionPredicate::OnDate(date) => {
                builder.push(" AND (ms.show_time AT TIME ZONE 'UTC')::DATE = ");
                builder.push_bind(*date);
            }
            MovieSessionPredicate::MovieIn(ids) => {
                builder.push(" AND ms.movie_id = ANY(");
                builder.push_bind(ids.clone());
                builder.push(")");
            }
        }
    }

    builder.push(" ORDER BY ms.show_time, ms.id");
    builder
}
