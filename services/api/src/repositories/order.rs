//! Order repository
//!
//! Order placement adjusts the food's stock and purchase counter and
//! inserts the order row inside a single transaction, so a failure at any
//! step leaves both tables untouched.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{food::Food, order::Order};

const ORDER_COLUMNS: &str = "id, food_id, buyer_email, order_quantity, \
                             food_name, food_price, food_image, created_at";

/// Failure modes of order placement
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The referenced food does not exist
    #[error("food not found")]
    FoodNotFound,

    /// The food's stock is smaller than the requested quantity
    #[error("insufficient stock")]
    InsufficientStock,

    /// Underlying database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Order repository for database operations
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List orders placed by the given buyer
    pub async fn list_by_buyer(&self, buyer_email: &str) -> sqlx::Result<Vec<Order>> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE buyer_email = $1 ORDER BY created_at DESC"
        ))
        .bind(buyer_email)
        .fetch_all(&self.pool)
        .await
    }

    /// Place an order for `order_quantity` units of the given food
    ///
    /// The food row is locked for the duration of the transaction, so
    /// concurrent orders against the same food serialize instead of losing
    /// updates. Stock is never driven negative: an oversized order fails
    /// with [`PlaceOrderError::InsufficientStock`] and changes nothing.
    pub async fn place(
        &self,
        buyer_email: &str,
        food_id: Uuid,
        order_quantity: i64,
    ) -> Result<Uuid, PlaceOrderError> {
        let mut tx = self.pool.begin().await?;

        let food = sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, category, image, description, origin,
                   price, quantity, purchase_count, added_by_email
            FROM foods
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(food_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PlaceOrderError::FoodNotFound)?;

        if food.quantity < order_quantity {
            return Err(PlaceOrderError::InsufficientStock);
        }

        sqlx::query(
            r#"
            UPDATE foods
            SET quantity = quantity - $2, purchase_count = purchase_count + $2
            WHERE id = $1
            "#,
        )
        .bind(food_id)
        .bind(order_quantity)
        .execute(&mut *tx)
        .await?;

        // Food metadata is captured here, not taken from the client
        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO orders
                (food_id, buyer_email, order_quantity, food_name, food_price, food_image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(food_id)
        .bind(buyer_email)
        .bind(order_quantity)
        .bind(&food.name)
        .bind(food.price)
        .bind(&food.image)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order_id)
    }

    /// Delete an order owned by the given buyer
    ///
    /// Scoped to the buyer so an order cannot be deleted through someone
    /// else's session. Deleting an order does not restore the food's stock
    /// or purchase count.
    pub async fn delete(&self, id: Uuid, buyer_email: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND buyer_email = $2")
            .bind(id)
            .bind(buyer_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
