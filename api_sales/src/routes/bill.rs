use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{env_config::Config, error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::dtos::bill::{CheckoutRequest, ClearSalesRequest};
use crate::services;

/// Lists the caller's bills, newest first.
#[get("")]
pub async fn get_bills(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let bills = services::bill::list_bills(pg_pool, claims.user_id).await?;
    Success::ok(bills)
}

/// Runs the checkout transaction and returns the created bill.
///
/// # Input
/// - JSON payload with customer info, the cart and the computed totals
///
/// # Output
/// - Success: the persisted bill with its allocated number and the cost
///   snapshot on every line
/// - Error: 400 Bad Request for an empty or malformed cart (or an
///   oversold line when oversell tolerance is off), 500 when the
///   transaction could not commit (no partial effects remain)
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/bills', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({
///     customerName: 'Asha',
///     customerPhone: '9876543210',
///     items: [
///       { productId: '8901234', name: 'Milk 1L', qty: 2, price: 30 }
///     ],
///     subtotal: 60,
///     tax: 10.8,
///     discount: 0,
///     grandTotal: 70.8,
///     paymentMode: 'UPI'
///   })
/// });
///
/// if (response.ok) {
///   const bill = await response.json();
///   console.log('Bill number:', bill.billNumber);
/// }
/// ```
#[post("")]
pub async fn post_checkout(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CheckoutRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let bill =
        services::checkout::checkout(pg_pool, &config, claims.user_id, req.into_inner()).await?;
    Success::created(bill)
}

/// Bulk-deletes the caller's sales history. Gated on the account
/// password, not just the token.
#[delete("/sales-data")]
pub async fn delete_sales_data(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<ClearSalesRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::bill::clear_sales(pg_pool, claims.user_id, &req.password).await?;
    Success::message("Cleared")
}
