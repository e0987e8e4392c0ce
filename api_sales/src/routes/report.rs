use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::services;

/// Per-bill profit breakdown with ledger-wide totals, derived at read
/// time from the stored cost snapshots.
#[get("/profit")]
pub async fn get_profit_report(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let report = services::bill::profit_report(pg_pool, claims.user_id).await?;
    Success::ok(report)
}
