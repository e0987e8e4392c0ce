use db::models::bill::PaymentMode;
use serde::Deserialize;

/// Checkout payload: the cart plus the totals the register computed.
/// The totals are stored as submitted; see DESIGN.md on that trust
/// boundary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub items: Vec<CartItemRequest>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub grand_total: f64,
    pub payment_mode: PaymentMode,
}

/// One cart line. `product_id` carries the barcode; it does not have to
/// exist in the catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub product_id: String,
    pub name: String,
    pub qty: i64,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct ClearSalesRequest {
    pub password: String,
}
