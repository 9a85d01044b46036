//! Handlers for the `/cinema/orders` resource.
//!
//! Orders belong to the caller; another user's order is reported as 404.
//! Orders cannot be changed once placed.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::pagination::{Page, PageParams};
use cinema_core::tickets::{ensure_unique_seats, validate_seat};
use cinema_core::types::DbId;
use cinema_db::models::order::{CreateOrder, OrderView};
use cinema_db::repositories::{MovieSessionRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/cinema/orders/
///
/// The caller's orders, newest first, paginated with `?page=&page_size=`.
pub async fn list_orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> AppResult<Json<Page<OrderView>>> {
    let count = OrderRepo::count_for_user(&state.pool, user.user_id).await?;
    let orders =
        OrderRepo::list_for_user(&state.pool, user.user_id, params.limit(), params.offset())
            .await?;
    Ok(Json(Page::new(&params, count, orders)))
}

/// POST /api/cinema/orders/
///
/// Places an order with one or more tickets. All tickets are inserted in a
/// single transaction; an already-sold seat fails the whole order with 409.
pub async fn create_order(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateOrder>,
) -> AppResult<impl IntoResponse> {
    if input.tickets.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "tickets: an order needs at least one ticket".into(),
        )));
    }

    let seats: Vec<(DbId, i32, i32)> = input
        .tickets
        .iter()
        .map(|t| (t.movie_session, t.row, t.seat))
        .collect();
    ensure_unique_seats(&seats)?;

    let mut session_ids: Vec<DbId> = input.tickets.iter().map(|t| t.movie_session).collect();
    session_ids.sort_unstable();
    session_ids.dedup();

    let layouts: HashMap<DbId, (i32, i32)> =
        MovieSessionRepo::seat_layouts(&state.pool, &session_ids)
            .await?
            .into_iter()
            .map(|l| (l.movie_session_id, (l.rows, l.seats_in_row)))
            .collect();

    for ticket in &input.tickets {
        let (rows, seats_in_row) = layouts.get(&ticket.movie_session).ok_or_else(|| {
            AppError::BadRequest(format!(
                "movie_session: no movie session with id {}",
                ticket.movie_session
            ))
        })?;
        validate_seat(ticket.row, ticket.seat, *rows, *seats_in_row)?;
    }

    let order = OrderRepo::create_with_tickets(&state.pool, user.user_id, &input.tickets).await?;

    tracing::info!(
        order_id = order.id,
        tickets = input.tickets.len(),
        user_id = user.user_id,
        "Order created",
    );

    let view = OrderRepo::find_for_user(&state.pool, order.id, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order", order.id))?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/cinema/orders/{id}/
pub async fn get_order(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<OrderView>> {
    let order = OrderRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order", id))?;
    Ok(Json(order))
}
