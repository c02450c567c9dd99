//! # Unit of Work
//!
//! The store abstraction the checkout orchestrator runs against, and its
//! SQLite implementation.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UnitOfWorkFactory::begin() ──► UnitOfWork                              │
//! │                                   │                                     │
//! │                                   ├── read_stock(id, lock_mode)         │
//! │                                   ├── decrement_stock(id, qty) → rows   │
//! │                                   ├── insert_transaction(..)   → id     │
//! │                                   ├── insert_transaction_line(..) → id  │
//! │                                   │                                     │
//! │                                   ├── commit()    all or ...            │
//! │                                   └── rollback()  ... nothing           │
//! │                                                                         │
//! │  Dropping a unit without commit() rolls it back.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking on SQLite
//! SQLite has no row locks; the unit of engagement is the database write
//! lock. The SQLite unit opens its transaction lazily, on the first write or
//! pessimistic read, so the first statement inside it always asks for the
//! write lock and waits up to the busy timeout for it.
//!
//! A pessimistic read first runs a no-op `UPDATE` on the row, which takes
//! the write lock and keeps it until the unit ends. The following `SELECT`
//! sees the latest committed stock.
//!
//! An optimistic read made before any write runs on the pool outside the
//! transaction, so no read snapshot is held while other checkouts commit.
//! The conditional decrement later re-checks stock under the write lock.
//! Reads made after the first write go through the open transaction.

use async_trait::async_trait;
use cashier_core::LockMode;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;

// =============================================================================
// Row and Input Types
// =============================================================================

/// What the inventory read returns for one product.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StockRow {
    pub product_id: i64,
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Header of a transaction about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub total_amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// A line about to be written under `transaction_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransactionLine {
    pub transaction_id: String,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub subtotal_cents: i64,
}

// =============================================================================
// Traits
// =============================================================================

/// Opens units of work.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    type Unit: UnitOfWork;

    async fn begin(&self) -> DbResult<Self::Unit>;
}

/// A set of store operations that commit together or not at all.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Reads a product's name, price and stock. With
    /// [`LockMode::Pessimistic`] the row stays locked until the unit ends.
    async fn read_stock(&mut self, product_id: i64, lock: LockMode) -> DbResult<Option<StockRow>>;

    /// Subtracts `quantity` only if at least that much is on hand.
    /// Returns the number of rows changed (0 or 1).
    async fn decrement_stock(&mut self, product_id: i64, quantity: i64) -> DbResult<u64>;

    /// Inserts a transaction header, returning its generated id.
    async fn insert_transaction(&mut self, header: &NewTransaction) -> DbResult<String>;

    /// Inserts one line item, returning its generated id.
    async fn insert_transaction_line(&mut self, line: &NewTransactionLine) -> DbResult<String>;

    async fn commit(self) -> DbResult<()>;

    async fn rollback(self) -> DbResult<()>;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

/// Unit-of-work factory over a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for SqliteStore {
    type Unit = SqliteUnitOfWork;

    async fn begin(&self) -> DbResult<SqliteUnitOfWork> {
        Ok(SqliteUnitOfWork {
            pool: self.pool.clone(),
            tx: None,
        })
    }
}

const SELECT_STOCK: &str = r#"
    SELECT id AS product_id, name, price_cents, stock
    FROM products
    WHERE id = ?1
"#;

/// One SQLite unit of work. The transaction is opened on first write and
/// rolls back on drop unless committed.
pub struct SqliteUnitOfWork {
    pool: SqlitePool,
    tx: Option<sqlx::Transaction<'static, Sqlite>>,
}

impl SqliteUnitOfWork {
    /// Whether the write transaction has been opened.
    pub fn is_writing(&self) -> bool {
        self.tx.is_some()
    }

    async fn writer(&mut self) -> DbResult<&mut sqlx::Transaction<'static, Sqlite>> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => {
                debug!("Opening write transaction");
                self.pool.begin().await?
            }
        };
        Ok(self.tx.insert(tx))
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn read_stock(&mut self, product_id: i64, lock: LockMode) -> DbResult<Option<StockRow>> {
        if lock.is_pessimistic() {
            debug!(product_id, "Locking product row");
            let tx = self.writer().await?;
            sqlx::query("UPDATE products SET stock = stock WHERE id = ?1")
                .bind(product_id)
                .execute(&mut **tx)
                .await?;
        }

        let query = sqlx::query_as::<_, StockRow>(SELECT_STOCK).bind(product_id);
        let row = match self.tx.as_mut() {
            Some(tx) => query.fetch_optional(&mut **tx).await?,
            None => query.fetch_optional(&self.pool).await?,
        };

        Ok(row)
    }

    async fn decrement_stock(&mut self, product_id: i64, quantity: i64) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - ?2
            WHERE id = ?1 AND stock >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut **self.writer().await?)
        .await?;

        Ok(result.rows_affected())
    }

    async fn insert_transaction(&mut self, header: &NewTransaction) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO transactions (id, total_amount_cents, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&id)
        .bind(header.total_amount_cents)
        .bind(header.created_at)
        .execute(&mut **self.writer().await?)
        .await?;

        Ok(id)
    }

    async fn insert_transaction_line(&mut self, line: &NewTransactionLine) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO transaction_lines (
                id, transaction_id, product_id, product_name,
                unit_price_cents, quantity, subtotal_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&id)
        .bind(&line.transaction_id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.unit_price_cents)
        .bind(line.quantity)
        .bind(line.subtotal_cents)
        .execute(&mut **self.writer().await?)
        .await?;

        Ok(id)
    }

    async fn commit(self) -> DbResult<()> {
        if let Some(tx) = self.tx {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn rollback(self) -> DbResult<()> {
        if let Some(tx) = self.tx {
            tx.rollback().await?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use cashier_core::NewProduct;

    async fn db_with_product(stock: i64) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Widget".to_string(),
                price_cents: 1000,
                stock,
                category_id: None,
            })
            .await
            .unwrap();
        (db, product.id)
    }

    #[tokio::test]
    async fn test_read_stock_in_both_modes() {
        let (db, id) = db_with_product(10).await;
        let store = db.store();

        for mode in [LockMode::Pessimistic, LockMode::Optimistic] {
            let mut uow = store.begin().await.unwrap();
            let row = uow.read_stock(id, mode).await.unwrap().unwrap();
            assert_eq!(row.stock, 10);
            assert_eq!(row.price_cents, 1000);
            assert!(uow.read_stock(id + 100, mode).await.unwrap().is_none());
            uow.rollback().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_write_transaction_opens_on_first_write() {
        let (db, id) = db_with_product(10).await;

        let mut uow = db.store().begin().await.unwrap();
        uow.read_stock(id, LockMode::Optimistic).await.unwrap();
        assert!(!uow.is_writing());
        uow.decrement_stock(id, 1).await.unwrap();
        assert!(uow.is_writing());
        assert_eq!(uow.read_stock(id, LockMode::Optimistic).await.unwrap().unwrap().stock, 9);
        uow.rollback().await.unwrap();

        let mut uow = db.store().begin().await.unwrap();
        uow.read_stock(id, LockMode::Pessimistic).await.unwrap();
        assert!(uow.is_writing());
        uow.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_optimistic_read_then_another_commit() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("uow.db")).max_connections(4))
            .await
            .unwrap();
        let id = db
            .products()
            .insert(&NewProduct {
                name: "Widget".to_string(),
                price_cents: 1000,
                stock: 5,
                category_id: None,
            })
            .await
            .unwrap()
            .id;

        let mut slow = db.store().begin().await.unwrap();
        assert_eq!(slow.read_stock(id, LockMode::Optimistic).await.unwrap().unwrap().stock, 5);

        let mut fast = db.store().begin().await.unwrap();
        assert_eq!(fast.decrement_stock(id, 2).await.unwrap(), 1);
        fast.commit().await.unwrap();

        // The slower unit writes against the latest stock, not its earlier read.
        assert_eq!(slow.decrement_stock(id, 4).await.unwrap(), 0);
        assert_eq!(slow.decrement_stock(id, 3).await.unwrap(), 1);
        slow.commit().await.unwrap();

        assert_eq!(db.products().get_by_id(id).await.unwrap().unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_conditional_decrement() {
        let (db, id) = db_with_product(5).await;
        let mut uow = db.store().begin().await.unwrap();

        assert_eq!(uow.decrement_stock(id, 3).await.unwrap(), 1);
        assert_eq!(uow.decrement_stock(id, 3).await.unwrap(), 0);
        assert_eq!(uow.decrement_stock(id, 2).await.unwrap(), 1);
        uow.commit().await.unwrap();

        assert_eq!(db.products().get_by_id(id).await.unwrap().unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let (db, id) = db_with_product(5).await;
        let mut uow = db.store().begin().await.unwrap();

        let tx_id = uow
            .insert_transaction(&NewTransaction {
                total_amount_cents: 1000,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        uow.insert_transaction_line(&NewTransactionLine {
            transaction_id: tx_id,
            product_id: id,
            product_name: "Widget".to_string(),
            unit_price_cents: 1000,
            quantity: 1,
            subtotal_cents: 1000,
        })
        .await
        .unwrap();
        uow.decrement_stock(id, 1).await.unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(db.transactions().count().await.unwrap(), 0);
        assert_eq!(db.products().get_by_id(id).await.unwrap().unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_drop_without_commit_rolls_back() {
        let (db, id) = db_with_product(5).await;
        {
            let mut uow = db.store().begin().await.unwrap();
            uow.decrement_stock(id, 5).await.unwrap();
        }

        assert_eq!(db.products().get_by_id(id).await.unwrap().unwrap().stock, 5);
    }
}
