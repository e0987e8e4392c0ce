use common::{
    error::{AppError, Res},
    password,
};
use db::models::bill::{Bill, BillItem};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::report::{ProfitLine, ProfitReport};

pub async fn list_bills(pool: &PgPool, user_id: Uuid) -> Res<Vec<Bill>> {
    db::bill::list_for_user(pool, user_id).await
}

/// Wipes the caller's sales history after re-checking the account
/// password. Bills and the bill counter go together, so numbering starts
/// over at 1 on the next sale.
pub async fn clear_sales(pool: &PgPool, user_id: Uuid, supplied_password: &str) -> Res<u64> {
    let user = db::user::get_by_id(pool, user_id).await?;
    if !password::password_matches(supplied_password, &user.password_hash) {
        return Err(AppError::Forbidden("Wrong password".to_string()));
    }

    let mut tx = pool.begin().await?;
    let deleted = db::bill::delete_all_for_user(&mut *tx, user_id).await?;
    db::bill::reset_counter(&mut *tx, user_id).await?;
    tx.commit().await?;

    log::info!("Cleared {} bills for user {}", deleted, user_id);
    Ok(deleted)
}

pub async fn profit_report(pool: &PgPool, user_id: Uuid) -> Res<ProfitReport> {
    let bills = db::bill::list_for_user(pool, user_id).await?;

    let lines: Vec<ProfitLine> = bills
        .iter()
        .map(|bill| ProfitLine {
            bill_number: bill.bill_number,
            date: bill.date,
            grand_total: bill.grand_total,
            tax: bill.tax,
            cost: bill_cost(&bill.items),
            profit: bill_profit(bill),
        })
        .collect();

    Ok(ProfitReport {
        total_sales: lines.iter().map(|l| l.grand_total).sum(),
        total_tax: lines.iter().map(|l| l.tax).sum(),
        total_cost: lines.iter().map(|l| l.cost).sum(),
        total_profit: lines.iter().map(|l| l.profit).sum(),
        bills: lines,
    })
}

/// Cost of goods for a bill, from the per-line cost snapshots.
pub fn bill_cost(items: &[BillItem]) -> f64 {
    items
        .iter()
        .map(|item| item.purchase_price * item.qty as f64)
        .sum()
}

/// Profit is what remains of the grand total after tax and cost of
/// goods. Lines with no cost snapshot (unmatched barcodes) count as
/// pure margin.
pub fn bill_profit(bill: &Bill) -> f64 {
    bill.grand_total - bill.tax - bill_cost(&bill.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sqlx::types::Json;

    fn item(qty: i64, price: f64, purchase_price: f64) -> BillItem {
        BillItem {
            product_id: "B1".to_string(),
            name: "Widget".to_string(),
            qty,
            price,
            purchase_price,
        }
    }

    fn bill(grand_total: f64, tax: f64, items: Vec<BillItem>) -> Bill {
        let epoch = NaiveDateTime::default();
        Bill {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            bill_number: 1,
            customer_name: "Walk-in".to_string(),
            customer_phone: None,
            items: Json(items),
            subtotal: grand_total - tax,
            tax,
            discount: 0.0,
            grand_total,
            payment_mode: "Cash".to_string(),
            date: epoch,
            created_at: epoch,
        }
    }

    #[test]
    fn profit_subtracts_tax_and_cost_of_goods() {
        let bill = bill(118.0, 18.0, vec![item(1, 100.0, 50.0)]);
        assert_eq!(bill_profit(&bill), 50.0);
    }

    #[test]
    fn cost_multiplies_snapshot_by_quantity() {
        let items = vec![item(3, 30.0, 24.0), item(2, 10.0, 6.0)];
        assert_eq!(bill_cost(&items), 3.0 * 24.0 + 2.0 * 6.0);
    }

    #[test]
    fn unmatched_lines_contribute_no_cost() {
        let bill = bill(100.0, 0.0, vec![item(4, 25.0, 0.0)]);
        assert_eq!(bill_profit(&bill), 100.0);
    }
}
