use common::error::{AppError, Res};
use db::{dtos::product::ProductUpsert, models::product::Product};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::product::UpsertProductRequest;

pub async fn list_products(pool: &PgPool, user_id: Uuid) -> Res<Vec<Product>> {
    db::product::list_for_user(pool, user_id).await
}

/// Adds a product, or merges into the existing row when the barcode is
/// already in the caller's catalog: quantity accumulates, the supplied
/// fields overwrite, and stored category, reorder threshold and expiry
/// date survive unless new values were sent.
pub async fn upsert_product(
    pool: &PgPool,
    user_id: Uuid,
    req: &UpsertProductRequest,
) -> Res<Product> {
    validate_product(req)?;
    let data = to_upsert(req);

    match db::product::find_by_barcode(pool, user_id, &data.barcode).await? {
        Some(existing) => db::product::merge(pool, existing.id, &data).await,
        None => db::product::insert(pool, user_id, &data).await,
    }
}

/// Owner-scoped and idempotent: an id that is absent or belongs to
/// someone else is a silent no-op.
pub async fn delete_product(pool: &PgPool, user_id: Uuid, product_id: Uuid) -> Res<()> {
    db::product::delete_for_user(pool, user_id, product_id).await?;
    Ok(())
}

fn validate_product(req: &UpsertProductRequest) -> Res<()> {
    if req.barcode.trim().is_empty() {
        return Err(AppError::Validation("Barcode is required".to_string()));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Product name is required".to_string()));
    }
    if req.purchase_price < 0.0 || req.selling_price < 0.0 {
        return Err(AppError::Validation(
            "Prices must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn to_upsert(req: &UpsertProductRequest) -> ProductUpsert {
    ProductUpsert {
        barcode: req.barcode.clone(),
        name: req.name.clone(),
        category: req.category.clone(),
        purchase_price: req.purchase_price,
        selling_price: req.selling_price,
        qty: req.qty,
        min_stock: req.min_stock,
        expiry_date: req.expiry_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(barcode: &str, name: &str) -> UpsertProductRequest {
        UpsertProductRequest {
            barcode: barcode.to_string(),
            name: name.to_string(),
            category: None,
            purchase_price: 10.0,
            selling_price: 15.0,
            qty: 5,
            min_stock: None,
            expiry_date: None,
        }
    }

    #[test]
    fn missing_barcode_or_name_is_rejected() {
        assert!(matches!(
            validate_product(&request("", "Milk")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_product(&request("B1", "  ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut req = request("B1", "Milk");
        req.purchase_price = -1.0;
        assert!(matches!(
            validate_product(&req),
            Err(AppError::Validation(_))
        ));
    }

    // The merge statement adds `qty` relatively and COALESCEs the
    // optional fields, so what reaches it decides what a re-add keeps:
    // omitted fields must stay `None` or they would clobber the stored
    // values.
    #[test]
    fn merge_add_keeps_omitted_fields_and_overwrites_supplied() {
        let mut req = request("B1", "Milk Full Cream");
        req.qty = 3;
        let data = to_upsert(&req);
        assert_eq!(data.name, "Milk Full Cream");
        assert_eq!(data.qty, 3);
        assert_eq!(data.category, None);
        assert_eq!(data.min_stock, None);
        assert_eq!(data.expiry_date, None);
    }

    #[test]
    fn supplied_category_passes_through() {
        let mut req = request("B1", "Milk");
        req.category = Some("Dairy".to_string());
        assert_eq!(to_upsert(&req).category.as_deref(), Some("Dairy"));
    }
}
