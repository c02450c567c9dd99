//! Transaction Writer: persists a header and its lines in the caller's unit
//! of work.

use cashier_core::{CheckoutError, Money};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::unit_of_work::{NewTransaction, NewTransactionLine, UnitOfWork};

/// A priced line waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLine {
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Ids generated for a written transaction, lines in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTransaction {
    pub transaction_id: String,
    pub line_ids: Vec<String>,
}

/// Inserts one header and every line, linked by the generated id.
///
/// ## Preconditions
/// `lines` is non-empty and `total` equals the sum of line subtotals.
/// Either violation is rejected before anything is written.
///
/// ## Errors
/// Any store failure is a `Persistence` error; the caller must roll back.
pub async fn create_transaction<U: UnitOfWork>(
    uow: &mut U,
    total: Money,
    lines: &[PendingLine],
    created_at: DateTime<Utc>,
) -> Result<WrittenTransaction, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::InvalidRequest(
            "a transaction needs at least one line".to_string(),
        ));
    }
    let summed: Money = lines.iter().map(|l| l.subtotal).sum();
    if summed != total {
        return Err(CheckoutError::InvalidRequest(format!(
            "total {total} does not match line subtotals {summed}"
        )));
    }

    let transaction_id = uow
        .insert_transaction(&NewTransaction {
            total_amount_cents: total.cents(),
            created_at,
        })
        .await?;

    let mut line_ids = Vec::with_capacity(lines.len());
    for line in lines {
        let line_id = uow
            .insert_transaction_line(&NewTransactionLine {
                transaction_id: transaction_id.clone(),
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                unit_price_cents: line.unit_price.cents(),
                quantity: line.quantity,
                subtotal_cents: line.subtotal.cents(),
            })
            .await?;
        line_ids.push(line_id);
    }

    debug!(
        transaction_id = %transaction_id,
        total = %total,
        lines = line_ids.len(),
        "Transaction written"
    );

    Ok(WrittenTransaction {
        transaction_id,
        line_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::unit_of_work::UnitOfWorkFactory;
    use cashier_core::NewProduct;

    #[tokio::test]
    async fn test_header_and_lines_written_together() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Pen".to_string(),
                price_cents: 150,
                stock: 10,
                category_id: None,
            })
            .await
            .unwrap();

        let mut uow = db.store().begin().await.unwrap();
        let written = create_transaction(
            &mut uow,
            Money::from_cents(450),
            &[PendingLine {
                product_id: product.id,
                product_name: product.name.clone(),
                unit_price: Money::from_cents(150),
                quantity: 3,
                subtotal: Money::from_cents(450),
            }],
            Utc::now(),
        )
        .await
        .unwrap();
        uow.commit().await.unwrap();

        let detail = db
            .transactions()
            .get_detail(&written.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.transaction.total_amount_cents, 450);
        assert_eq!(detail.lines.len(), 1);
        assert_eq!(detail.lines[0].id, written.line_ids[0]);
        assert_eq!(detail.lines[0].product_name, "Pen");
    }

    #[tokio::test]
    async fn test_mismatched_total_is_rejected_before_writing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.store().begin().await.unwrap();

        let err = create_transaction(
            &mut uow,
            Money::from_cents(1),
            &[PendingLine {
                product_id: 1,
                product_name: "Ghost".to_string(),
                unit_price: Money::from_cents(100),
                quantity: 1,
                subtotal: Money::from_cents(100),
            }],
            Utc::now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidRequest(_)));

        let err = create_transaction(&mut uow, Money::zero(), &[], Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidRequest(_)));

        uow.rollback().await.unwrap();
        assert_eq!(db.transactions().count().await.unwrap(), 0);
    }
}
