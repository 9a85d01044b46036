//! Genre model and DTOs.

use cinema_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a genre.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenre {
    pub name: String,
}

/// DTO for partially updating a genre.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGenre {
    pub name: Option<String>,
}

impl From<CreateGenre> for UpdateGenre {
    fn from(input: CreateGenre) -> Self {
        Self {
            name: Some(input.name),
        }
    }
}
