use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, types::Json};
use uuid::Uuid;

use crate::{dtos::bill::BillInsert, models::bill::Bill};

pub async fn list_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Bill>> {
    sqlx::query_as::<_, Bill>("SELECT * FROM bills WHERE user_id = $1 ORDER BY bill_number DESC")
        .bind(user_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

/// Advances the per-user bill sequence and returns the new number.
///
/// A single upsert-increment: the first bill creates the counter row at 1,
/// later bills lock the row for the rest of the enclosing transaction.
/// Two checkouts for the same user therefore serialize here, and a
/// rollback reverts the increment, keeping the sequence gapless.
pub async fn next_number<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO bill_counters (user_id, last_number)
        VALUES ($1, 1)
        ON CONFLICT (user_id)
        DO UPDATE SET last_number = bill_counters.last_number + 1
        RETURNING last_number
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: BillInsert,
) -> Res<Bill> {
    sqlx::query_as::<_, Bill>(
        r#"
        INSERT INTO bills
            (user_id, bill_number, customer_name, customer_phone, items,
             subtotal, tax, discount, grand_total, payment_mode, date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.bill_number)
    .bind(data.customer_name)
    .bind(data.customer_phone)
    .bind(Json(data.items))
    .bind(data.subtotal)
    .bind(data.tax)
    .bind(data.discount)
    .bind(data.grand_total)
    .bind(data.payment_mode)
    .bind(data.date)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_all_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM bills WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(AppError::from)
}

/// Dropping the counter row makes the next checkout start over at 1.
pub async fn reset_counter<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM bill_counters WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}
