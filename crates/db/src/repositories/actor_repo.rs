//! Repository for the `actors` table.

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::actor::{Actor, CreateActor, UpdateActor};

/// Column list including the derived `full_name`.
const COLUMNS: &str = "id, first_name, last_name, \
                       (first_name || ' ' || last_name) AS full_name";

/// Provides CRUD operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let query = format!(
            "INSERT INTO actors (first_name, last_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all actors ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors ORDER BY id");
        sqlx::query_as::<_, Actor>(&query).fetch_all(pool).await
    }

    /// Actors linked to a movie, ordered by id.
    pub async fn list_for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Actor>, sqlx::Error> {
        sqlx::query_as::<_, Actor>(
            "SELECT a.id, a.first_name, a.last_name, \
                    (a.first_name || ' ' || a.last_name) AS full_name \
             FROM movie_actors ma \
             JOIN actors a ON a.id = ma.actor_id \
             WHERE ma.movie_id = $1 \
             ORDER BY a.id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Update an actor. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActor,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!(
            "UPDATE actors SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(input.first_name.as_deref().map(str::trim))
            .bind(input.last_name.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids from `ids` that do not exist.
    pub async fn find_missing(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        super::find_missing_ids(pool, "actors", ids).await
    }
}
