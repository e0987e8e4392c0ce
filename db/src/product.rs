use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::product::ProductUpsert, models::product::Product};

pub async fn list_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Product>> {
    sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn find_by_barcode<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    barcode: &str,
) -> Res<Option<Product>> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE user_id = $1 AND barcode = $2")
        .bind(user_id)
        .bind(barcode)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: &ProductUpsert,
) -> Res<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products
            (user_id, barcode, name, category, purchase_price, selling_price, qty, min_stock, expiry_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&data.barcode)
    .bind(&data.name)
    .bind(data.category.as_deref().unwrap_or("General"))
    .bind(data.purchase_price)
    .bind(data.selling_price)
    .bind(data.qty)
    .bind(data.min_stock.unwrap_or(5))
    .bind(data.expiry_date)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Merges an upsert into an existing row: the quantity is added
/// relatively so a concurrent checkout decrement is never lost, the
/// supplied fields overwrite, and category, reorder threshold and
/// expiry date only change when a new value was supplied.
pub async fn merge<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
    data: &ProductUpsert,
) -> Res<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET name = $2,
            category = COALESCE($3, category),
            purchase_price = $4,
            selling_price = $5,
            qty = qty + $6,
            min_stock = COALESCE($7, min_stock),
            expiry_date = COALESCE($8, expiry_date),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(product_id)
    .bind(&data.name)
    .bind(data.category.as_deref())
    .bind(data.purchase_price)
    .bind(data.selling_price)
    .bind(data.qty)
    .bind(data.min_stock)
    .bind(data.expiry_date)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Relative stock adjustment used by checkout; negative deltas decrement.
pub async fn adjust_qty<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
    delta: i64,
) -> Res<()> {
    sqlx::query("UPDATE products SET qty = qty + $2, updated_at = now() WHERE id = $1")
        .bind(product_id)
        .bind(delta)
        .execute(executor)
        .await?;
    Ok(())
}

/// Owner-scoped delete. Returns the number of rows removed; zero is not
/// an error.
pub async fn delete_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    product_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
        .bind(product_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(AppError::from)
}
