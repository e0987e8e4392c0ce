use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Unique per owning user, not globally.
    pub barcode: String,
    pub name: String,
    pub category: String,
    pub purchase_price: f64,
    pub selling_price: f64,
    /// May go negative when oversell tolerance is enabled.
    pub qty: i64,
    pub min_stock: i64,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
