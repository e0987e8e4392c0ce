use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::product::UpsertProductRequest;
use crate::services;

/// Lists the caller's products in catalog order.
#[get("")]
pub async fn get_products(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let products = services::product::list_products(pg_pool, claims.user_id).await?;
    Success::ok(products)
}

/// Adds a product or merges stock into an existing barcode.
///
/// # Input
/// - JSON payload with barcode, name, prices and a quantity to add
///
/// # Output
/// - Success: the resulting product record
/// - Error: 400 Bad Request for a missing barcode/name or negative prices
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/products', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     barcode: '8901234',
///     name: 'Milk 1L',
///     category: 'Dairy',
///     purchasePrice: 24,
///     sellingPrice: 30,
///     qty: 12,
///     expiryDate: '2026-09-30'
///   })
/// });
/// // Posting the same barcode again adds to the stored quantity
/// ```
#[post("")]
pub async fn post_product(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<UpsertProductRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let product =
        services::product::upsert_product(pg_pool, claims.user_id, &req.into_inner()).await?;
    Success::ok(product)
}

/// Deletes a product by id. Absent or foreign ids succeed silently.
#[delete("/{id}")]
pub async fn delete_product(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::product::delete_product(pg_pool, claims.user_id, path.into_inner()).await?;
    Success::message("Deleted")
}
