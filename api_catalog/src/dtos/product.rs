use chrono::NaiveDate;
use serde::Deserialize;

/// Add-or-merge payload. A barcode already in the caller's catalog has
/// the quantity added and the supplied fields overwritten; omitted
/// optional fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProductRequest {
    pub barcode: String,
    pub name: String,
    pub category: Option<String>,
    pub purchase_price: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub qty: i64,
    pub min_stock: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
}
