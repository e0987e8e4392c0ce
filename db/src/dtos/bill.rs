use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::bill::BillItem;

pub struct BillInsert {
    pub user_id: Uuid,
    pub bill_number: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub items: Vec<BillItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub grand_total: f64,
    pub payment_mode: String,
    pub date: NaiveDateTime,
}
