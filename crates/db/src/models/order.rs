//! Order and ticket models and DTOs.

use cinema_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::movie_session::MovieSessionListItem;

/// A row from the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// A ticket joined with the list projection of its movie session.
///
/// Flat shape for `FromRow`; converted to [`TicketView`] for output.
#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: DbId,
    pub order_id: DbId,
    pub seat_row: i32,
    pub seat: i32,
    pub movie_session_id: DbId,
    pub show_time: Timestamp,
    pub movie_title: String,
    pub cinema_hall_name: String,
    pub cinema_hall_capacity: i64,
    pub tickets_available: i64,
}

/// Ticket as returned inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketView {
    pub id: DbId,
    pub row: i32,
    pub seat: i32,
    pub movie_session: MovieSessionListItem,
}

impl From<TicketRow> for TicketView {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id,
            row: row.seat_row,
            seat: row.seat,
            movie_session: MovieSessionListItem {
                id: row.movie_session_id,
                show_time: row.show_time,
                movie_title: row.movie_title,
                cinema_hall_name: row.cinema_hall_name,
                cinema_hall_capacity: row.cinema_hall_capacity,
                tickets_available: row.tickets_available,
            },
        }
    }
}

/// Order with its tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderView {
    pub id: DbId,
    pub created_at: Timestamp,
    pub tickets: Vec<TicketView>,
}

/// One requested seat in a new order.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreateTicket {
    pub row: i32,
    pub seat: i32,
    pub movie_session: DbId,
}

/// DTO for placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub tickets: Vec<CreateTicket>,
}
