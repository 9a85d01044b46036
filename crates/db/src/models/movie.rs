//! Movie model, its three JSON projections, and DTOs.
//!
//! | Projection        | Used by                 | `genres` / `actors`            |
//! |-------------------|-------------------------|--------------------------------|
//! | [`MovieListItem`] | `GET /movies/`          | genre names / actor full names |
//! | [`MovieDetail`]   | `GET /movies/{id}/`     | nested [`Genre`] / [`Actor`]   |
//! | [`MovieWrite`]    | `POST /movies/` (201)   | ids                            |

use cinema_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::actor::Actor;
use crate::models::genre::Genre;

/// A bare row from the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
}

/// List projection.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct MovieListItem {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

/// Detail projection with nested relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDetail {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<Genre>,
    pub actors: Vec<Actor>,
}

impl MovieDetail {
    pub fn new(movie: Movie, genres: Vec<Genre>, actors: Vec<Actor>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            duration: movie.duration,
            genres,
            actors,
        }
    }
}

/// Write projection returned after creation: relations as id lists.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct MovieWrite {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<DbId>,
    pub actors: Vec<DbId>,
}

/// DTO for creating a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: i32,
    #[serde(default)]
    pub genres: Vec<DbId>,
    #[serde(default)]
    pub actors: Vec<DbId>,
}
