//! Repository for the `cinema_halls` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::cinema_hall::{CinemaHall, CreateCinemaHall, UpdateCinemaHall};

/// Column list including the derived `capacity`.
const COLUMNS: &str = "id, name, rows, seats_in_row, \
                       (rows::BIGINT * seats_in_row::BIGINT) AS capacity";

/// Provides CRUD operations for cinema halls.
pub struct CinemaHallRepo;

impl CinemaHallRepo {
    pub async fn create(pool: &PgPool, input: &CreateCinemaHall) -> Result<CinemaHall, sqlx::Error> {
        let query = format!(
            "INSERT INTO cinema_halls (name, rows, seats_in_row) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CinemaHall>(&query)
            .bind(input.name.trim())
            .bind(input.rows)
            .bind(input.seats_in_row)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CinemaHall>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cinema_halls WHERE id = $1");
        sqlx::query_as::<_, CinemaHall>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<CinemaHall>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cinema_halls ORDER BY id");
        sqlx::query_as::<_, CinemaHall>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a hall. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCinemaHall,
    ) -> Result<Option<CinemaHall>, sqlx::Error> {
        let query = format!(
            "UPDATE cinema_halls SET \
                 name = COALESCE($2, name), \
                 rows = COALESCE($3, rows), \
                 seats_in_row = COALESCE($4, seats_in_row) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CinemaHall>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.rows)
            .bind(input.seats_in_row)
            .fetch_optional(pool)
            .await
    }

    /// Highest row and highest seat sold for any session in the hall.
    /// `None` when no ticket has been sold there.
    pub async fn furthest_sold_seat(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(i32, i32)>, sqlx::Error> {
        let (max_row, max_seat) = sqlx::query_as::<_, (Option<i32>, Option<i32>)>(
            "SELECT MAX(t.seat_row), MAX(t.seat) FROM tickets t \
             JOIN movie_sessions ms ON ms.id = t.movie_session_id \
             WHERE ms.cinema_hall_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(max_row.zip(max_seat))
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cinema_halls WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
