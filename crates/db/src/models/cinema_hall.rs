//! Cinema hall model and DTOs.

use cinema_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cinema_halls` table, with the derived `capacity`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CinemaHall {
    pub id: DbId,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    /// `rows * seats_in_row`, computed in SQL.
    pub capacity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCinemaHall {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCinemaHall {
    pub name: Option<String>,
    pub rows: Option<i32>,
    pub seats_in_row: Option<i32>,
}

impl From<CreateCinemaHall> for UpdateCinemaHall {
    fn from(input: CreateCinemaHall) -> Self {
        Self {
            name: Some(input.name),
            rows: Some(input.rows),
            seats_in_row: Some(input.seats_in_row),
        }
    }
}
