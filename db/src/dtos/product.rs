use chrono::NaiveDate;

/// Field set shared by the insert and merge paths of the product upsert.
pub struct ProductUpsert {
    pub barcode: String,
    pub name: String,
    /// `None` keeps the stored category (insert falls back to "General").
    pub category: Option<String>,
    pub purchase_price: f64,
    pub selling_price: f64,
    /// Added to the stored quantity on merge, taken as-is on insert.
    pub qty: i64,
    /// `None` keeps the stored threshold (insert falls back to 5).
    pub min_stock: Option<i64>,
    /// `None` keeps the stored expiry date.
    pub expiry_date: Option<NaiveDate>,
}
