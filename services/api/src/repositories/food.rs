//! Food catalog repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::food::{Food, FoodPayload};

const FOOD_COLUMNS: &str = "id, name, category, image, description, origin, \
                            price, quantity, purchase_count, added_by_email";

/// Turn a raw search term into an ILIKE pattern, escaping the wildcard
/// characters so user input matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Food repository for database operations
#[derive(Clone)]
pub struct FoodRepository {
    pool: PgPool,
}

impl FoodRepository {
    /// Create a new food repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List foods, optionally filtered by a case-insensitive substring match
    /// on the name, optionally paginated
    ///
    /// Pagination applies only when both `page` and `size` are present; a
    /// NULL limit/offset leaves the result set unbounded.
    pub async fn list(
        &self,
        search: Option<&str>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> sqlx::Result<Vec<Food>> {
        let pattern = search.map(like_pattern);
        let offset = match (page, size) {
            (Some(page), Some(size)) => Some(page.saturating_mul(size)),
            _ => None,
        };

        sqlx::query_as::<_, Food>(&format!(
            r#"
            SELECT {FOOD_COLUMNS}
            FROM foods
            WHERE $1::TEXT IS NULL OR name ILIKE $1
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(pattern)
        .bind(size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Total number of foods in the catalog
    pub async fn count(&self) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM foods")
            .fetch_one(&self.pool)
            .await
    }

    /// List foods matching a category exactly
    pub async fn list_by_category(&self, category: &str) -> sqlx::Result<Vec<Food>> {
        sqlx::query_as::<_, Food>(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods WHERE category = $1 ORDER BY name"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }

    /// The most purchased foods, for the trending view
    pub async fn top(&self, limit: i64) -> sqlx::Result<Vec<Food>> {
        sqlx::query_as::<_, Food>(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods ORDER BY purchase_count DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// List foods created by the given owner
    pub async fn list_by_owner(&self, owner_email: &str) -> sqlx::Result<Vec<Food>> {
        sqlx::query_as::<_, Food>(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods WHERE added_by_email = $1 ORDER BY name"
        ))
        .bind(owner_email)
        .fetch_all(&self.pool)
        .await
    }

    /// Find a food by its identifier
    pub async fn find_by_id(&self, id: Uuid) -> sqlx::Result<Option<Food>> {
        sqlx::query_as::<_, Food>(&format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a new food owned by `owner_email`, returning the assigned id
    ///
    /// Purchase count always starts at zero; it is only ever adjusted by
    /// order placement.
    pub async fn create(&self, owner_email: &str, payload: &FoodPayload) -> sqlx::Result<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO foods
                (name, category, image, description, origin, price, quantity,
                 purchase_count, added_by_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8)
            RETURNING id
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.category)
        .bind(&payload.image)
        .bind(&payload.description)
        .bind(&payload.origin)
        .bind(payload.price)
        .bind(payload.quantity)
        .bind(owner_email)
        .fetch_one(&self.pool)
        .await
    }

    /// Replace the mutable fields of a food, returning the number of rows
    /// matched
    ///
    /// The owner and the purchase count are deliberately not part of the
    /// update.
    pub async fn update(&self, id: Uuid, payload: &FoodPayload) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE foods
            SET name = $2, category = $3, image = $4, description = $5,
                origin = $6, price = $7, quantity = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.category)
        .bind(&payload.image)
        .bind(&payload.description)
        .bind(&payload.origin)
        .bind(payload.price)
        .bind(payload.quantity)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("cur"), "%cur%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }
}
