use chrono::Utc;
use common::{
    env_config::Config,
    error::{AppError, Res},
};
use db::{
    dtos::bill::BillInsert,
    models::{
        bill::{Bill, BillItem},
        product::Product,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::bill::{CartItemRequest, CheckoutRequest};

/// Runs the checkout transaction for one cart.
///
/// Bill-number allocation, stock decrements and the bill insert all
/// commit as a single unit. Validation failures are reported
/// as such before the transaction starts; any storage failure inside it
/// rolls the whole sale back and surfaces as a generic checkout error.
pub async fn checkout(
    pool: &PgPool,
    config: &Config,
    user_id: Uuid,
    req: CheckoutRequest,
) -> Res<Bill> {
    validate_cart(&req)?;

    run_transaction(pool, config, user_id, req)
        .await
        .map_err(|error| match error {
            AppError::Database(db_error) => {
                log::error!("Checkout transaction failed: {}", db_error);
                AppError::Checkout("Checkout failed".to_string())
            }
            other => other,
        })
}

async fn run_transaction(
    pool: &PgPool,
    config: &Config,
    user_id: Uuid,
    req: CheckoutRequest,
) -> Res<Bill> {
    let mut tx = pool.begin().await?;

    // Serializes concurrent checkouts for this user until commit.
    let bill_number = db::bill::next_number(&mut *tx, user_id).await?;

    let mut items = Vec::with_capacity(req.items.len());
    for entry in &req.items {
        let product = db::product::find_by_barcode(&mut *tx, user_id, &entry.product_id).await?;

        if let Some(product) = &product {
            // Policy refusal, not a transaction fault: reported as a
            // validation failure so it reaches the client as a 400.
            if !config.allow_negative_stock && product.qty < entry.qty {
                return Err(AppError::Validation(format!(
                    "Insufficient stock for {}",
                    product.name
                )));
            }
            db::product::adjust_qty(&mut *tx, product.id, -entry.qty).await?;
        }

        items.push(line_item(entry, product.as_ref()));
    }

    let bill = db::bill::insert(
        &mut *tx,
        BillInsert {
            user_id,
            bill_number,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            items,
            subtotal: req.subtotal,
            tax: req.tax,
            discount: req.discount,
            grand_total: req.grand_total,
            payment_mode: req.payment_mode.as_str().to_string(),
            date: Utc::now().naive_utc(),
        },
    )
    .await?;

    tx.commit().await?;
    Ok(bill)
}

/// Builds the stored line for one cart entry. A matched product
/// contributes its current cost as the snapshot; an unmatched barcode
/// sells with a zero cost rather than failing the sale.
fn line_item(entry: &CartItemRequest, product: Option<&Product>) -> BillItem {
    BillItem {
        product_id: entry.product_id.clone(),
        name: entry.name.clone(),
        qty: entry.qty,
        price: entry.price,
        purchase_price: product.map(|p| p.purchase_price).unwrap_or(0.0),
    }
}

fn validate_cart(req: &CheckoutRequest) -> Res<()> {
    if req.items.is_empty() {
        return Err(AppError::Validation("Cart is empty".to_string()));
    }
    for entry in &req.items {
        if entry.qty <= 0 {
            return Err(AppError::Validation(format!(
                "Invalid quantity for {}",
                entry.product_id
            )));
        }
        if entry.price < 0.0 {
            return Err(AppError::Validation(format!(
                "Invalid price for {}",
                entry.product_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use db::models::bill::PaymentMode;

    fn cart_entry(barcode: &str, qty: i64, price: f64) -> CartItemRequest {
        CartItemRequest {
            product_id: barcode.to_string(),
            name: "Milk 1L".to_string(),
            qty,
            price,
        }
    }

    fn product(barcode: &str, purchase_price: f64) -> Product {
        let epoch = NaiveDateTime::default();
        Product {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            barcode: barcode.to_string(),
            name: "Milk 1L".to_string(),
            category: "Dairy".to_string(),
            purchase_price,
            selling_price: 30.0,
            qty: 10,
            min_stock: 5,
            expiry_date: None,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    fn checkout_request(items: Vec<CartItemRequest>) -> CheckoutRequest {
        CheckoutRequest {
            customer_name: "Walk-in".to_string(),
            customer_phone: None,
            items,
            subtotal: 0.0,
            tax: 0.0,
            discount: 0.0,
            grand_total: 0.0,
            payment_mode: PaymentMode::Cash,
        }
    }

    #[test]
    fn matched_product_snapshots_its_cost() {
        let entry = cart_entry("B1", 2, 30.0);
        let item = line_item(&entry, Some(&product("B1", 24.0)));
        assert_eq!(item.purchase_price, 24.0);
        assert_eq!(item.qty, 2);
        assert_eq!(item.price, 30.0);
    }

    #[test]
    fn unmatched_barcode_sells_at_zero_cost() {
        let entry = cart_entry("UNKNOWN", 1, 99.0);
        let item = line_item(&entry, None);
        assert_eq!(item.purchase_price, 0.0);
        assert_eq!(item.product_id, "UNKNOWN");
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert!(matches!(
            validate_cart(&checkout_request(vec![])),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let req = checkout_request(vec![cart_entry("B1", 0, 30.0)]);
        assert!(matches!(
            validate_cart(&req),
            Err(AppError::Validation(_))
        ));
        let req = checkout_request(vec![cart_entry("B1", -2, 30.0)]);
        assert!(matches!(
            validate_cart(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let req = checkout_request(vec![cart_entry("B1", 1, -5.0)]);
        assert!(matches!(
            validate_cart(&req),
            Err(AppError::Validation(_))
        ));
    }
}
