//! Actor model and DTOs.

use cinema_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `actors` table, with the derived `full_name`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    /// `"{first_name} {last_name}"`, computed in SQL.
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActor {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<CreateActor> for UpdateActor {
    fn from(input: CreateActor) -> Self {
        Self {
            first_name: Some(input.first_name),
            last_name: Some(input.last_name),
        }
    }
}
