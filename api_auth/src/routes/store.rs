use std::sync::Arc;

use actix_web::{Responder, get, put, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use db::models::user::StoreConfig;
use sqlx::PgPool;

use crate::services;

/// Returns the authenticated user's store settings, defaults filled in.
#[get("")]
pub async fn get_store_config(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::user::get_user_by_id(pg_pool, claims.user_id).await?;
    Success::ok(user.store_config.0)
}

/// Saves the store settings used on invoices and for the checkout tax
/// rate display.
#[put("")]
pub async fn put_store_config(
    claims: web::ReqData<JwtClaims>,
    body: web::Json<StoreConfig>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::user::save_store_config(pg_pool, claims.user_id, &body.into_inner()).await?;
    Success::message("Saved")
}
