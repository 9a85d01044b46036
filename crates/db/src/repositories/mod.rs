//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod actor_repo;
pub mod cinema_hall_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod movie_session_repo;
pub mod order_repo;
pub mod session_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use cinema_hall_repo::CinemaHallRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use movie_session_repo::MovieSessionRepo;
pub use order_repo::OrderRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

use cinema_core::types::DbId;
use sqlx::PgPool;

/// Return the subset of `ids` that has no row in `table`, in input order.
///
/// `table` is always a compile-time constant from this crate, never user input.
pub(crate) async fn find_missing_ids(
    pool: &PgPool,
    table: &'static str,
    ids: &[DbId],
) -> Result<Vec<DbId>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = format!(
        "SELECT t.id FROM UNNEST($1::BIGINT[]) WITH ORDINALITY AS t(id, ord) \
         WHERE NOT EXISTS (SELECT 1 FROM {table} x WHERE x.id = t.id) \
         ORDER BY t.ord"
    );
    sqlx::query_scalar::<_, DbId>(&query)
        .bind(ids)
        .fetch_all(pool)
        .await
}
