//! Movie session (screening) model, projections, and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::cinema_hall::CinemaHall;
use crate::models::movie::MovieListItem;

/// A row from the `movie_sessions` table; also the write projection.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct MovieSession {
    pub id: DbId,
    pub show_time: Timestamp,
    #[serde(rename = "movie")]
    pub movie_id: DbId,
    #[serde(rename = "cinema_hall")]
    pub cinema_hall_id: DbId,
}

/// List projection with hall occupancy.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct MovieSessionListItem {
    pub id: DbId,
    pub show_time: Timestamp,
    pub movie_title: String,
    pub cinema_hall_name: String,
    pub cinema_hall_capacity: i64,
    /// Capacity minus tickets already sold for this session.
    pub tickets_available: i64,
}

/// An occupied seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct TakenPlace {
    #[sqlx(rename = "seat_row")]
    pub row: i32,
    pub seat: i32,
}

/// Detail projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieSessionDetail {
    pub id: DbId,
    pub show_time: Timestamp,
    pub movie: MovieListItem,
    pub cinema_hall: CinemaHall,
    pub taken_places: Vec<TakenPlace>,
}

/// Hall layout for a session, used to validate ticket seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct SeatLayout {
    pub movie_session_id: DbId,
    pub rows: i32,
    pub seats_in_row: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovieSession {
    pub show_time: Timestamp,
    pub movie: DbId,
    pub cinema_hall: DbId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovieSession {
    pub show_time: Option<Timestamp>,
    pub movie: Option<DbId>,
    pub cinema_hall: Option<DbId>,
}

impl From<CreateMovieSession> for UpdateMovieSession {
    fn from(input: CreateMovieSession) -> Self {
        Self {
            show_time: Some(input.show_time),
            movie: Some(input.movie),
            cinema_hall: Some(input.cinema_hall),
        }
    }
}
