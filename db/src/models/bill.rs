use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Per-user sequence starting at 1, strictly increasing.
    pub bill_number: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub items: Json<Vec<BillItem>>,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub grand_total: f64,
    pub payment_mode: String,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// One sold line, embedded in the bill.
///
/// `purchase_price` is the cost snapshot taken at sale time; later edits
/// to the product do not change it. Zero when the barcode had no match
/// in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    /// Barcode of the sold product as entered in the cart.
    pub product_id: String,
    pub name: String,
    pub qty: i64,
    /// Sell price at sale time.
    pub price: f64,
    pub purchase_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_mode_accepts_known_values() {
        assert_eq!(
            serde_json::from_str::<PaymentMode>("\"Cash\"").unwrap(),
            PaymentMode::Cash
        );
        assert_eq!(
            serde_json::from_str::<PaymentMode>("\"UPI\"").unwrap(),
            PaymentMode::Upi
        );
    }

    #[test]
    fn payment_mode_rejects_unknown_values() {
        assert!(serde_json::from_str::<PaymentMode>("\"Card\"").is_err());
        assert!(serde_json::from_str::<PaymentMode>("\"upi\"").is_err());
    }

    #[test]
    fn bill_item_wire_format_is_camel_case() {
        let item = BillItem {
            product_id: "8901234".to_string(),
            name: "Milk 1L".to_string(),
            qty: 2,
            price: 30.0,
            purchase_price: 24.0,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], "8901234");
        assert_eq!(json["purchasePrice"], 24.0);
    }
}
