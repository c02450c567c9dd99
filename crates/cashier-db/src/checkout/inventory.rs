//! Inventory Store: stock reads and guarded stock decrements inside a unit
//! of work.

use cashier_core::{CheckoutError, LockMode};
use tracing::debug;

use crate::unit_of_work::{StockRow, UnitOfWork};

/// Reads a product's price and stock, locking the row in pessimistic mode.
///
/// ## Errors
/// `NotFound(product_id)` if no such product exists.
pub async fn get_for_update<U: UnitOfWork>(
    uow: &mut U,
    product_id: i64,
    lock: LockMode,
) -> Result<StockRow, CheckoutError> {
    let row = uow
        .read_stock(product_id, lock)
        .await?
        .ok_or(CheckoutError::NotFound(product_id))?;

    debug!(product_id, stock = row.stock, %lock, "Read stock");
    Ok(row)
}

/// Decrements stock by `quantity` with a single conditional update.
///
/// ```text
/// UPDATE products SET stock = stock - q WHERE id = ? AND stock >= q
///   rows = 1 → Ok
///   rows = 0 → re-read: missing → NotFound, otherwise InsufficientStock
/// ```
///
/// Stock is never changed on failure.
pub async fn decrement_stock<U: UnitOfWork>(
    uow: &mut U,
    product_id: i64,
    quantity: i64,
) -> Result<(), CheckoutError> {
    let affected = uow.decrement_stock(product_id, quantity).await?;
    if affected > 0 {
        debug!(product_id, quantity, "Stock decremented");
        return Ok(());
    }

    match uow.read_stock(product_id, LockMode::Optimistic).await? {
        None => Err(CheckoutError::NotFound(product_id)),
        Some(row) => Err(CheckoutError::InsufficientStock {
            product_id,
            available: row.stock,
            requested: quantity,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::unit_of_work::UnitOfWorkFactory;
    use cashier_core::NewProduct;

    async fn setup(stock: i64) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Notebook".to_string(),
                price_cents: 350,
                stock,
                category_id: None,
            })
            .await
            .unwrap();
        (db, product.id)
    }

    #[tokio::test]
    async fn test_get_for_update_missing_product() {
        let (db, id) = setup(1).await;
        let mut uow = db.store().begin().await.unwrap();

        let err = get_for_update(&mut uow, id + 1, LockMode::Pessimistic)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::NotFound(id + 1));
    }

    #[tokio::test]
    async fn test_decrement_reports_available_stock() {
        let (db, id) = setup(2).await;
        let mut uow = db.store().begin().await.unwrap();

        let err = decrement_stock(&mut uow, id, 3).await.unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InsufficientStock {
                product_id: id,
                available: 2,
                requested: 3
            }
        );

        decrement_stock(&mut uow, id, 2).await.unwrap();
        let row = get_for_update(&mut uow, id, LockMode::Optimistic).await.unwrap();
        assert_eq!(row.stock, 0);
    }

    #[tokio::test]
    async fn test_decrement_missing_product() {
        let (db, id) = setup(2).await;
        let mut uow = db.store().begin().await.unwrap();

        let err = decrement_stock(&mut uow, id + 5, 1).await.unwrap_err();
        assert_eq!(err, CheckoutError::NotFound(id + 5));
    }
}
