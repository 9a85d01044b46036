//! Repository for the `movies` table and its `movie_genres` / `movie_actors`
//! junctions.
//!
//! List queries are assembled from [`MoviePredicate`]s with
//! [`sqlx::QueryBuilder`]; every user-supplied value goes through
//! `push_bind`.

use cinema_core::filters::MoviePredicate;
use cinema_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::movie::{CreateMovie, Movie, MovieListItem, MovieWrite};

const COLUMNS: &str = "m.id, m.title, m.description, m.duration";

/// List projection: relations flattened to genre names and actor full names.
const LIST_COLUMNS: &str = "\
    m.id, m.title, m.description, m.duration, \
    ARRAY(SELECT g.name::TEXT FROM movie_genres mg JOIN genres g ON g.id = mg.genre_id \
          WHERE mg.movie_id = m.id ORDER BY g.id) AS genres, \
    ARRAY(SELECT (a.first_name || ' ' || a.last_name)::TEXT FROM movie_actors ma \
          JOIN actors a ON a.id = ma.actor_id \
          WHERE ma.movie_id = m.id ORDER BY a.id) AS actors";

/// Write projection: relations as id arrays.
const WRITE_COLUMNS: &str = "\
    m.id, m.title, m.description, m.duration, \
    ARRAY(SELECT mg.genre_id FROM movie_genres mg WHERE mg.movie_id = m.id \
          ORDER BY mg.genre_id) AS genres, \
    ARRAY(SELECT ma.actor_id FROM movie_actors ma WHERE ma.movie_id = m.id \
          ORDER BY ma.actor_id) AS actors";

/// Provides data access for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a movie and link its genres and actors in one transaction.
    ///
    /// Callers should verify the relation ids exist first; a dangling id
    /// fails the foreign key and rolls back the whole insert.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<MovieWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO movies (title, description, duration) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(input.duration)
        .fetch_one(&mut *tx)
        .await?;

        if !input.genres.is_empty() {
            sqlx::query(
                "INSERT INTO movie_genres (movie_id, genre_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(&input.genres)
            .execute(&mut *tx)
            .await?;
        }

        if !input.actors.is_empty() {
            sqlx::query(
                "INSERT INTO movie_actors (movie_id, actor_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(&input.actors)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!("SELECT {WRITE_COLUMNS} FROM movies m WHERE m.id = $1");
        let created = sqlx::query_as::<_, MovieWrite>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Find a bare movie row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies m WHERE m.id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie in its list projection.
    pub async fn find_list_item(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MovieListItem>, sqlx::Error> {
        let query = format!("SELECT {LIST_COLUMNS} FROM movies m WHERE m.id = $1");
        sqlx::query_as::<_, MovieListItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List movies matching every predicate, ordered by id.
    ///
    /// Relation predicates use `EXISTS`, so a movie never appears twice no
    /// matter how many of the requested actors or genres it has.
    pub async fn list(
        pool: &PgPool,
        predicates: &[MoviePredicate],
    ) -> Result<Vec<MovieListItem>, sqlx::Error> {
        let mut builder = list_query(predicates);
        builder
            .build_query_as::<MovieListItem>()
            .fetch_all(pool)
            .await
    }
}

/// Build `SELECT ... FROM movies m WHERE <predicates> ORDER BY m.id`.
fn list_query(predicates: &[MoviePredicate]) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::<Postgres>::new(format!("SELECT {LIST_COLUMNS} FROM movies m WHERE TRUE"));

    for predicate in predicates {
        match predicate {
            MoviePredicate::TitleContains(needle) => {
                builder.push(" AND m.title ILIKE ");
                builder.push_bind(format!("%{}%", escape_like(needle)));
            }
            MoviePredicate::HasAnyActor(ids) => {
                builder.push(
                    " AND EXISTS (SELECT 1 FROM movie_actors ma \
                     WHERE ma.movie_id = m.id AND ma.actor_id = ANY(",
                );
                builder.push_bind(ids.clone());
                builder.push("))");
            }
            MoviePredicate::HasAnyGenre(ids) => {
                builder.push(
                    " AND EXISTS (SELECT 1 FROM movie_genres mg \
                     WHERE mg.movie_id = m.id AND mg.genre_id = ANY(",
                );
                builder.push_bind(ids.clone());
                builder.push("))");
            }
        }
    }

    builder.push(" ORDER BY m.id");
    builder
}

/// Escape `LIKE` metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
