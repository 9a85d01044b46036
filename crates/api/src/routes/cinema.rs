use axum::routing::get;
use axum::Router;

use crate::handlers::{actors, api_root, cinema_halls, genres, movie_sessions, movies, orders};
use crate::state::AppState;

/// Catalog and order routes, merged into `/api`.
///
/// Paths carry the `/cinema` prefix themselves so the API root can be
/// served at `/api/cinema/` with its trailing slash.
///
/// ```text
/// GET                         /cinema/                   api root
///
/// GET, POST                   /cinema/genres/            list, create
/// GET, PUT, PATCH, DELETE     /cinema/genres/{id}/       get, replace, update, delete
/// GET, POST                   /cinema/actors/            list, create
/// GET, PUT, PATCH, DELETE     /cinema/actors/{id}/       get, replace, update, delete
/// GET, POST                   /cinema/cinema_halls/      list, create
/// GET, PUT, PATCH, DELETE     /cinema/cinema_halls/{id}/ get, replace, update, delete
///
/// GET, POST                   /cinema/movies/            list (?title, ?actors, ?genres), create
/// GET                         /cinema/movies/{id}/       get
///
/// GET, POST                   /cinema/movie_sessions/    list (?date, ?movie), create
/// GET, PUT, PATCH, DELETE     /cinema/movie_sessions/{id}/ get, replace, update, delete
///
/// GET, POST                   /cinema/orders/            list (paginated), create
/// GET                         /cinema/orders/{id}/       get
/// ```
///
/// Methods not listed answer 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cinema/", get(api_root::api_root))
        .route(
            "/cinema/genres/",
            get(genres::list_genres).post(genres::create_genre),
        )
        .route(
            "/cinema/genres/{id}/",
            get(genres::get_genre)
                .put(genres::replace_genre)
                .patch(genres::update_genre)
                .delete(genres::delete_genre),
        )
        .route(
            "/cinema/actors/",
            get(actors::list_actors).post(actors::create_actor),
        )
        .route(
            "/cinema/actors/{id}/",
            get(actors::get_actor)
                .put(actors::replace_actor)
                .patch(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .route(
            "/cinema/cinema_halls/",
            get(cinema_halls::list_cinema_halls).post(cinema_halls::create_cinema_hall),
        )
        .route(
            "/cinema/cinema_halls/{id}/",
            get(cinema_halls::get_cinema_hall)
                .put(cinema_halls::replace_cinema_hall)
                .patch(cinema_halls::update_cinema_hall)
                .delete(cinema_halls::delete_cinema_hall),
        )
        .route(
            "/cinema/movies/",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route("/cinema/movies/{id}/", get(movies::get_movie))
        .route(
            "/cinema/movie_sessions/",
            get(movie_sessions::list_movie_sessions).post(movie_sessions::create_movie_session),
        )
        .route(
            "/cinema/movie_sessions/{id}/",
            get(movie_sessions::get_movie_session)
                .put(movie_sessions::replace_movie_session)
                .patch(movie_sessions::update_movie_session)
                .delete(movie_sessions::delete_movie_session),
        )
        .route(
            "/cinema/orders/",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/cinema/orders/{id}/", get(orders::get_order))
}
