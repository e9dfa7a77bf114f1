//! Database-backed tests for order placement and deletion
//!
//! These run against the PostgreSQL instance named by `DATABASE_URL` and
//! are skipped silently when the variable is unset, so the rest of the
//! suite works without local infrastructure. Each test creates its own
//! food under a unique buyer identity and removes its rows afterwards.

use sqlx::PgPool;
use uuid::Uuid;

use api::{
    models::food::FoodPayload,
    repositories::{
        food::FoodRepository,
        order::{OrderRepository, PlaceOrderError},
    },
};
use common::database::{self, DatabaseConfig};

async fn test_pool() -> Option<PgPool> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping database-backed test");
        return None;
    }

    let config = DatabaseConfig::from_env().expect("database config");
    let pool = database::init_pool(&config).await.expect("database pool");
    database::ensure_schema(&pool).await.expect("schema");
    Some(pool)
}

fn unique_buyer() -> String {
    format!("buyer-{}@tastr.app", Uuid::new_v4())
}

fn pizza(quantity: i64) -> FoodPayload {
    FoodPayload {
        name: "Pizza".to_string(),
        category: "Italian".to_string(),
        image: "https://img.example/pizza.jpg".to_string(),
        description: "Wood-fired".to_string(),
        origin: "Italy".to_string(),
        price: 9.0,
        quantity,
    }
}

async fn cleanup(pool: &PgPool, food_id: Uuid, buyer: &str) {
    sqlx::query("DELETE FROM orders WHERE buyer_email = $1")
        .bind(buyer)
        .execute(pool)
        .await
        .ok();
    sqlx::query("DELETE FROM foods WHERE id = $1")
        .bind(food_id)
        .execute(pool)
        .await
        .ok();
}

#[tokio::test]
async fn placing_an_order_moves_stock_into_purchase_count() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let foods = FoodRepository::new(pool.clone());
    let orders = OrderRepository::new(pool.clone());

    let buyer = unique_buyer();
    let food_id = foods.create(&buyer, &pizza(10)).await.unwrap();

    let order_id = orders.place(&buyer, food_id, 3).await.unwrap();

    let food = foods.find_by_id(food_id).await.unwrap().unwrap();
    assert_eq!(food.quantity, 7);
    assert_eq!(food.purchase_count, 3);

    let list = orders.list_by_buyer(&buyer).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, order_id);
    assert_eq!(list[0].food_id, food_id);
    assert_eq!(list[0].order_quantity, 3);
    assert_eq!(list[0].food_name, "Pizza");

    cleanup(&pool, food_id, &buyer).await;
}

#[tokio::test]
async fn oversized_order_is_rejected_at_the_stock_boundary() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let foods = FoodRepository::new(pool.clone());
    let orders = OrderRepository::new(pool.clone());

    let buyer = unique_buyer();
    let food_id = foods.create(&buyer, &pizza(5)).await.unwrap();

    // Ordering exactly the remaining stock succeeds
    orders.place(&buyer, food_id, 5).await.unwrap();

    let food = foods.find_by_id(food_id).await.unwrap().unwrap();
    assert_eq!(food.quantity, 0);
    assert_eq!(food.purchase_count, 5);

    // One more unit crosses the boundary and changes nothing
    let err = orders.place(&buyer, food_id, 1).await.unwrap_err();
    assert!(matches!(err, PlaceOrderError::InsufficientStock));

    let food = foods.find_by_id(food_id).await.unwrap().unwrap();
    assert_eq!(food.quantity, 0);
    assert_eq!(food.purchase_count, 5);
    assert_eq!(orders.list_by_buyer(&buyer).await.unwrap().len(), 1);

    cleanup(&pool, food_id, &buyer).await;
}

#[tokio::test]
async fn ordering_an_absent_food_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let orders = OrderRepository::new(pool.clone());

    let err = orders
        .place(&unique_buyer(), Uuid::new_v4(), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, PlaceOrderError::FoodNotFound));
}

#[tokio::test]
async fn deleting_an_order_leaves_the_food_untouched() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let foods = FoodRepository::new(pool.clone());
    let orders = OrderRepository::new(pool.clone());

    let buyer = unique_buyer();
    let food_id = foods.create(&buyer, &pizza(10)).await.unwrap();
    let order_id = orders.place(&buyer, food_id, 4).await.unwrap();

    // Another buyer's session cannot delete the order
    assert!(!orders.delete(order_id, "other@tastr.app").await.unwrap());

    assert!(orders.delete(order_id, &buyer).await.unwrap());
    assert!(orders.list_by_buyer(&buyer).await.unwrap().is_empty());

    // Stock and purchase count stay as placed; deletion is not a refund
    let food = foods.find_by_id(food_id).await.unwrap().unwrap();
    assert_eq!(food.quantity, 6);
    assert_eq!(food.purchase_count, 4);

    // Repeat deletion finds nothing
    assert!(!orders.delete(order_id, &buyer).await.unwrap());

    cleanup(&pool, food_id, &buyer).await;
}
