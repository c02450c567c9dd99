//! # Report Repository
//!
//! Sales summaries over committed transactions.
//!
//! ## Query Plan
//! ```text
//! window ──bounds(now)──► [from, until)
//!                            │
//!          ┌─ BEGIN (one read snapshot) ─────────────────────────────┐
//!          │  transactions        SUM(total) + COUNT(*)              │
//!          │  transaction_lines   GROUP BY product_id, top quantity  │
//!          └─ COMMIT ────────────────────────────────────────────────┘
//! ```
//!
//! Both aggregates read the same snapshot, so a checkout committing in
//! between cannot make revenue and best seller disagree.
//!
//! SQLite's integer `SUM` fails on overflow. A floating `TOTAL` pass runs
//! first and rejects windows whose sums come near the i64 limit with
//! [`DbError::SumOverflow`].

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use cashier_core::{BestSellingProduct, ReportWindow, SalesSummary};

/// Float sums at or above this are treated as overflowing. Kept below
/// `i64::MAX` to absorb rounding in `TOTAL`.
const SUM_LIMIT: f64 = 9.2e18;

#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Summary for `window`, with "today" taken from the wall clock.
    pub async fn sales_summary(&self, window: ReportWindow) -> DbResult<SalesSummary> {
        self.sales_summary_at(window, Utc::now()).await
    }

    /// Summary for `window` as seen at `now`.
    ///
    /// ## Best seller
    /// Highest summed quantity per product; ties go to the lowest product
    /// id. Lines whose product was deleted (NULL reference) are left out.
    /// An empty window has no best seller.
    pub async fn sales_summary_at(
        &self,
        window: ReportWindow,
        now: DateTime<Utc>,
    ) -> DbResult<SalesSummary> {
        let (from, until) = window.bounds(now)?;
        debug!(?window, %from, %until, "Computing sales summary");

        let mut tx = self.pool.begin().await?;

        let (revenue_estimate, quantity_estimate, total_transactions): (f64, f64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    (SELECT TOTAL(total_amount_cents)
                     FROM transactions
                     WHERE created_at >= ?1 AND created_at < ?2),
                    (SELECT COALESCE(MAX(q), 0.0) FROM (
                        SELECT TOTAL(tl.quantity) AS q
                        FROM transaction_lines tl
                        JOIN transactions t ON t.id = tl.transaction_id
                        WHERE t.created_at >= ?1 AND t.created_at < ?2
                          AND tl.product_id IS NOT NULL
                        GROUP BY tl.product_id
                    )),
                    (SELECT COUNT(*)
                     FROM transactions
                     WHERE created_at >= ?1 AND created_at < ?2)
                "#,
            )
            .bind(from)
            .bind(until)
            .fetch_one(&mut *tx)
            .await?;

        if revenue_estimate >= SUM_LIMIT {
            return Err(DbError::SumOverflow("total_revenue_cents".to_string()));
        }
        if quantity_estimate >= SUM_LIMIT {
            return Err(DbError::SumOverflow("quantity_sold".to_string()));
        }

        let total_revenue_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_amount_cents), 0)
            FROM transactions
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_one(&mut *tx)
        .await?;

        let best_selling_product = if total_transactions == 0 {
            None
        } else {
            sqlx::query_as::<_, BestSellingProduct>(
                r#"
                SELECT
                    tl.product_id AS product_id,
                    COALESCE(p.name, MAX(tl.product_name)) AS name,
                    SUM(tl.quantity) AS quantity_sold
                FROM transaction_lines tl
                JOIN transactions t ON t.id = tl.transaction_id
                LEFT JOIN products p ON p.id = tl.product_id
                WHERE t.created_at >= ?1 AND t.created_at < ?2
                  AND tl.product_id IS NOT NULL
                GROUP BY tl.product_id
                ORDER BY quantity_sold DESC, tl.product_id ASC
                LIMIT 1
                "#,
            )
            .bind(from)
            .bind(until)
            .fetch_optional(&mut *tx)
            .await?
        };

        tx.commit().await?;

        Ok(SalesSummary {
            total_revenue_cents,
            total_transactions,
            best_selling_product,
        })
    }
}
