//! Query-parameter filtering for list endpoints.
//!
//! Raw query strings are deserialized into `*Query` structs, parsed and
//! validated into `*Filter` structs, and finally flattened into a list of
//! predicates. Predicates within one list are combined with AND by the
//! repository layer; an empty list matches everything.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Query parameter names, shared with the OpenAPI document.
pub const PARAM_DATE: &str = "date";
pub const PARAM_MOVIE: &str = "movie";
pub const PARAM_ACTORS: &str = "actors";
pub const PARAM_GENRES: &str = "genres";
pub const PARAM_TITLE: &str = "title";

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse a comma-separated list of ids (`"1,2,3"`).
///
/// Whitespace around items is ignored and empty items are skipped, so
/// `"1,,2"` and `" 1 , 2 "` both yield `[1, 2]`. Duplicates are removed while
/// preserving first-seen order.
pub fn parse_id_list(param: &str, raw: &str) -> Result<Vec<DbId>, CoreError> {
    let mut ids = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id: DbId = item.parse().map_err(|_| {
            CoreError::Validation(format!(
                "'{param}' must be a comma-separated list of integer ids, got '{item}'"
            ))
        })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(param: &str, raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "'{param}' must be a date in YYYY-MM-DD format, got '{raw}'"
        ))
    })
}

fn non_blank(raw: Option<&String>) -> Option<&str> {
    raw.map(|s| s.trim()).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// Raw query parameters accepted by `GET /movies/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieQuery {
    pub title: Option<String>,
    pub actors: Option<String>,
    pub genres: Option<String>,
}

/// A single condition a movie must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoviePredicate {
    /// Title contains the needle, case-insensitive.
    TitleContains(String),
    /// Movie is linked to at least one of the actors.
    HasAnyActor(Vec<DbId>),
    /// Movie is linked to at least one of the genres.
    HasAnyGenre(Vec<DbId>),
}

/// Validated movie list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub actors: Vec<DbId>,
    pub genres: Vec<DbId>,
}

impl MovieFilter {
    pub fn from_query(query: &MovieQuery) -> Result<Self, CoreError> {
        let actors = match non_blank(query.actors.as_ref()) {
            Some(raw) => parse_id_list(PARAM_ACTORS, raw)?,
            None => Vec::new(),
        };
        let genres = match non_blank(query.genres.as_ref()) {
            Some(raw) => parse_id_list(PARAM_GENRES, raw)?,
            None => Vec::new(),
        };
        Ok(Self {
            title: non_blank(query.title.as_ref()).map(str::to_string),
            actors,
            genres,
        })
    }

    pub fn predicates(&self) -> Vec<MoviePredicate> {
        let mut out = Vec::new();
        if let Some(title) = &self.title {
            out.push(MoviePredicate::TitleContains(title.clone()));
        }
        if !self.actors.is_empty() {
            out.push(MoviePredicate::HasAnyActor(self.actors.clone()));
        }
        if !self.genres.is_empty() {
            out.push(MoviePredicate::HasAnyGenre(self.genres.clone()));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Movie sessions
// ---------------------------------------------------------------------------

/// Raw query parameters accepted by `GET /movie_sessions/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieSessionQuery {
    pub date: Option<String>,
    pub movie: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieSessionPredicate {
    /// `show_time` falls on this UTC calendar date.
    OnDate(NaiveDate),
    /// Session screens one of these movies.
    MovieIn(Vec<DbId>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieSessionFilter {
    pub date: Option<NaiveDate>,
    pub movies: Vec<DbId>,
}

impl MovieSessionFilter {
    pub fn from_query(query: &MovieSessionQuery) -> Result<Self, CoreError> {
        let date = non_blank(query.date.as_ref())
            .map(|raw| parse_date(PARAM_DATE, raw))
            .transpose()?;
        let movies = match non_blank(query.movie.as_ref()) {
            Some(raw) => parse_id_list(PARAM_MOVIE, raw)?,
            None => Vec::new(),
        };
        Ok(Self { date, movies })
    }

    pub fn predicates(&self) -> Vec<MovieSessionPredicate> {
        let mut out = Vec::new();
        if let Some(date) = self.date {
            out.push(MovieSessionPredicate::OnDate(date));
        }
        if !self.movies.is_empty() {
            out.push(MovieSessionPredicate::MovieIn(self.movies.clone()));
        }
        out
    }
}
