//! Repository for the `orders` and `tickets` tables.
//!
//! Orders are always read scoped to their owner.

use std::collections::HashMap;

use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::{CreateTicket, Order, OrderView, TicketRow, TicketView};
use crate::repositories::movie_session_repo::LIST_COLUMNS;

const COLUMNS: &str = "id, user_id, created_at";

/// Provides data access for orders and their tickets.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order and all of its tickets atomically.
    ///
    /// A seat that is already taken violates `uq_tickets_session_row_seat`;
    /// the transaction is rolled back and nothing is persisted.
    pub async fn create_with_tickets(
        pool: &PgPool,
        user_id: DbId,
        tickets: &[CreateTicket],
    ) -> Result<Order, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO orders (user_id) VALUES ($1) RETURNING {COLUMNS}");
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        for ticket in tickets {
            sqlx::query(
                "INSERT INTO tickets (movie_session_id, order_id, seat_row, seat) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(ticket.movie_session)
            .bind(order.id)
            .bind(ticket.row)
            .bind(ticket.seat)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    /// Find an order owned by `user_id`. Another user's order is `None`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<OrderView>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND user_id = $2");
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        match order {
            Some(order) => Ok(Self::attach_tickets(pool, vec![order]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Count all orders owned by `user_id`.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// One page of `user_id`'s orders, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderView>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        let orders = sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Self::attach_tickets(pool, orders).await
    }

    /// Load tickets for a batch of orders with a single query, preserving
    /// the order of `orders`.
    async fn attach_tickets(
        pool: &PgPool,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderView>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
        let query = format!(
            "SELECT t.id, t.order_id, t.seat_row, t.seat, t.movie_session_id, \
                    {SESSION_COLUMNS} \
             FROM tickets t \
             JOIN movie_sessions ms ON ms.id = t.movie_session_id \
             JOIN movies m ON m.id = ms.movie_id \
             JOIN cinema_halls ch ON ch.id = ms.cinema_hall_id \
             WHERE t.order_id = ANY($1) \
             ORDER BY t.id",
            SESSION_COLUMNS = session_columns_for_ticket(),
        );
        let rows = sqlx::query_as::<_, TicketRow>(&query)
            .bind(&order_ids)
            .fetch_all(pool)
            .await?;

        let mut by_order: HashMap<DbId, Vec<TicketView>> = HashMap::new();
        for row in rows {
            by_order.entry(row.order_id).or_default().push(row.into());
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderView {
                id: order.id,
                created_at: order.created_at,
                tickets: by_order.remove(&order.id).unwrap_or_default(),
            })
            .collect())
    }
}

/// The session list columns minus `ms.id`, which [`TicketRow`] already
/// carries as `movie_session_id`.
fn session_columns_for_ticket() -> &'static str {
    LIST_COLUMNS
        .strip_prefix("ms.id, ")
        .unwrap_or(LIST_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_columns_drop_session_id() {
        let columns = session_columns_for_ticket();
        assert!(columns.starts_with("ms.show_time"));
        assert!(columns.contains("tickets_available"));
    }
}
