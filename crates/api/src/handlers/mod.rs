//! HTTP handlers, one module per resource.

pub mod actors;
pub mod api_root;
pub mod cinema_halls;
pub mod genres;
pub mod movie_sessions;
pub mod movies;
pub mod orders;
pub mod users;
