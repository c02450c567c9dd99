//! # Transaction Repository
//!
//! Read-only access to committed sales. Rows are written exclusively by the
//! checkout unit of work and are immutable afterwards.

use sqlx::SqlitePool;

use crate::error::DbResult;
use cashier_core::{Transaction, TransactionDetail, TransactionLine};

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "SELECT id, total_amount_cents, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Lines of a transaction, in insertion order.
    pub async fn get_lines(&self, transaction_id: &str) -> DbResult<Vec<TransactionLine>> {
        let lines = sqlx::query_as::<_, TransactionLine>(
            r#"
            SELECT
                id, transaction_id, product_id, product_name,
                unit_price_cents, quantity, subtotal_cents
            FROM transaction_lines
            WHERE transaction_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// A transaction with all of its lines.
    pub async fn get_detail(&self, id: &str) -> DbResult<Option<TransactionDetail>> {
        let Some(transaction) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let lines = self.get_lines(id).await?;

        Ok(Some(TransactionDetail { transaction, lines }))
    }

    /// Most recent transactions first.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, total_amount_cents, created_at
            FROM transactions
            ORDER BY created_at DESC, id
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn line_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transaction_lines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use cashier_core::{CheckoutItem, LockMode, NewProduct};

    #[tokio::test]
    async fn test_deleted_product_keeps_history() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Kettle".to_string(),
                price_cents: 3_999,
                stock: 5,
                category_id: None,
            })
            .await
            .unwrap();

        let receipt = db
            .checkout()
            .checkout(&[CheckoutItem::new(product.id, 2)], LockMode::Pessimistic)
            .await
            .unwrap();

        // Re-pricing then deleting must not touch the recorded sale.
        db.products()
            .update(
                product.id,
                &NewProduct {
                    name: product.name.clone(),
                    price_cents: 1,
                    stock: 3,
                    category_id: None,
                },
            )
            .await
            .unwrap();
        db.products().delete(product.id).await.unwrap();

        let detail = db
            .transactions()
            .get_detail(&receipt.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.transaction.total_amount_cents, 7_998);
        assert_eq!(detail.lines.len(), 1);
        assert_eq!(detail.lines[0].product_id, None);
        assert_eq!(detail.lines[0].product_name, "Kettle");
        assert_eq!(detail.lines[0].unit_price_cents, 3_999);
        assert_eq!(detail.lines[0].subtotal_cents, 7_998);
    }

    #[tokio::test]
    async fn test_missing_transaction() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db
            .transactions()
            .get_detail("550e8400-e29b-41d4-a716-446655440000")
            .await
            .unwrap()
            .is_none());
        assert!(db.transactions().list_recent(10).await.unwrap().is_empty());
    }
}
