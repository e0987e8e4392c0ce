use common::error::Res;
use db::models::user::{StoreConfig, User};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::get_by_id(pool, user_id).await
}

/// Replaces the user's store settings wholesale; absent fields have
/// already been filled with defaults during deserialization.
pub async fn save_store_config(pool: &PgPool, user_id: Uuid, config: &StoreConfig) -> Res<()> {
    db::user::update_store_config(pool, user_id, config).await
}
