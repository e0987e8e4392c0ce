use chrono::NaiveDateTime;
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, types::Json};
use uuid::Uuid;

use crate::{
    dtos::user::RegistrationUpsert,
    models::user::{StoreConfig, User},
};

pub async fn find_by_email_or_username<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
    username: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 OR username = $2")
        .bind(email)
        .bind(username)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_username<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn insert_unverified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: RegistrationUpsert,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash, otp, otp_expires, verified, store_config)
        VALUES ($1, $2, $3, $4, $5, FALSE, $6)
        RETURNING *
        "#,
    )
    .bind(data.username)
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.otp)
    .bind(data.otp_expires)
    .bind(Json(StoreConfig::default()))
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Re-issues credentials and a fresh OTP on an existing unverified row.
pub async fn refresh_registration<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    password_hash: &str,
    otp: &str,
    otp_expires: NaiveDateTime,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET password_hash = $2, otp = $3, otp_expires = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(password_hash)
    .bind(otp)
    .bind(otp_expires)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Promotes a user to verified and clears the OTP fields in the same write.
pub async fn mark_verified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET verified = TRUE, otp = NULL, otp_expires = NULL, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_store_config<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    config: &StoreConfig,
) -> Res<()> {
    sqlx::query("UPDATE users SET store_config = $2, updated_at = now() WHERE id = $1")
        .bind(user_id)
        .bind(Json(config))
        .execute(executor)
        .await?;
    Ok(())
}
