//! Order repository: basket aggregation and the delivery lifecycle.
//!
//! The basket is the single `open = true` order per user. `add_item` is the
//! only write path that creates orders; `close` is the only one that ends
//! them. Both are race-free:
//!
//! - `add_item` folds "find the open basket or create one" into a single
//!   `INSERT .. ON CONFLICT` against the partial unique index on
//!   `(user_id) WHERE open`, so concurrent first adds converge on one row.
//! - `close` flips the flag with `UPDATE .. WHERE id = $1 AND open`, so a
//!   second close observes zero affected rows and reports a conflict.

use std::collections::HashMap;

use sqlx::PgPool;

use mealdrop_core::{LocationId, OrderId, UserId};

use super::RepositoryError;
use crate::models::{LineItem, NewLineItem, Order};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Merge a line item into the user's open basket, creating the basket if
    /// none exists.
    ///
    /// If the basket already carries this food, its quantity is overwritten
    /// with the incoming value (set-basket-quantity semantics, not a sum) and
    /// the stored unit price is left untouched. Otherwise the item is
    /// appended. Returns the basket's order ID either way; the caller cannot
    /// tell a fresh basket from an amended one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either statement fails, e.g.
    /// on an unresolvable food or location reference.
    pub async fn add_item(
        &self,
        user_id: UserId,
        location_id: LocationId,
        item: NewLineItem,
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Atomic find-or-create of the open basket. The DO UPDATE arm is a
        // no-op touch so that RETURNING yields the id in both branches.
        let order_id = sqlx::query_scalar::<_, OrderId>(
            r#"
            INSERT INTO "order" (user_id, location_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) WHERE open
            DO UPDATE SET updated_at = now()
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(location_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO order_item (order_id, food_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (order_id, food_id)
            DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(order_id)
        .bind(item.food_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order_id)
    }

    /// Mark a delivery complete: the one-way `Open -> Closed` transition.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order is already closed
    /// (closed orders never reopen) and `RepositoryError::NotFound` if it
    /// doesn't exist.
    pub async fn close(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result =
            sqlx::query(r#"UPDATE "order" SET open = FALSE, updated_at = now() WHERE id = $1 AND open"#)
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Zero rows: either unknown or already closed. Closed orders never
        // reopen, so the follow-up read cannot misreport a live basket.
        let exists =
            sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS (SELECT 1 FROM "order" WHERE id = $1)"#)
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if exists {
            Err(RepositoryError::Conflict("delivery is closed".to_owned()))
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    /// The `open` flag of the user's most recently created order.
    ///
    /// Returns `None` if the user has never ordered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest_open_flag(&self, user_id: UserId) -> Result<Option<bool>, RepositoryError> {
        let open = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT open FROM "order"
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(open)
    }

    /// All orders with their line items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, location_id, open, created_at, updated_at
            FROM "order"
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT order_id, food_id, quantity, unit_price
            FROM order_item
            ORDER BY order_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<OrderId, Vec<LineItem>> = HashMap::new();
        for row in item_rows {
            items_by_order.entry(row.order_id).or_default().push(row.item);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect())
    }
}

/// Row shape for the `order` table, without its items.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    location_id: LocationId,
    open: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<LineItem>) -> Order {
        Order {
            id: self.id,
            user_id: self.user_id,
            location_id: self.location_id,
            open: self.open,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Row shape for `order_item` joined back to its order.
#[derive(sqlx::FromRow)]
struct ItemRow {
    order_id: OrderId,
    #[sqlx(flatten)]
    item: LineItem,
}
