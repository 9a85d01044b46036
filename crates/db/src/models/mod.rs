//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` structs, one per JSON projection of the entity
//! - A `Deserialize` create DTO for inserts (also used for full `PUT` updates)
//! - A `Deserialize` update DTO (all `Option` fields) for `PATCH`

pub mod actor;
pub mod cinema_hall;
pub mod genre;
pub mod movie;
pub mod movie_session;
pub mod order;
pub mod session;
pub mod user;
