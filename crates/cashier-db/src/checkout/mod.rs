//! # Checkout Orchestrator
//!
//! Turns a cart into a committed transaction and the matching stock
//! decrements, or changes nothing at all.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(items, lock_mode)                                             │
//! │                                                                         │
//! │  Validating   normalize_cart: non-empty, qty > 0, merge, sort by id    │
//! │      │        (no store access yet)                                    │
//! │      ▼                                                                  │
//! │  ── begin unit of work ───────────────────────────────────────────┐    │
//! │      │                                                             │    │
//! │  Pricing      get_for_update per product (locks in pessimistic)   │    │
//! │      │        qty > stock? → InsufficientStock                     │    │
//! │      │        price_cart → subtotals + total                       │    │
//! │      ▼                                                             │    │
//! │  Persisting   create_transaction: header + lines                  │    │
//! │      ▼                                                             │    │
//! │  Adjusting    decrement_stock per product (conditional)           │    │
//! │      ▼                                                             │    │
//! │  ── commit ───────────────────────────────────────────────────────┘    │
//! │      ▼                                                                  │
//! │  Committed    → CheckoutReceipt                                        │
//! │                                                                         │
//! │  Any error after begin → rollback → Failed                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds no in-process locks. All isolation between concurrent
//! checkouts comes from the store.

pub mod inventory;
pub mod writer;

use cashier_core::checkout::normalize_cart;
use cashier_core::pricing::{price_cart, PriceInput};
use cashier_core::{
    CheckoutError, CheckoutItem, CheckoutReceipt, CheckoutState, CoreError, LockMode, Money,
    ReceiptLine,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::unit_of_work::{UnitOfWork, UnitOfWorkFactory};
use writer::PendingLine;

/// Outcome of one checkout, with the state it failed in (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutAttempt {
    pub failed_in: Option<CheckoutState>,
    pub result: Result<CheckoutReceipt, CheckoutError>,
}

/// Tracks the state machine for a single checkout and logs transitions.
struct Progress {
    state: CheckoutState,
    lock: LockMode,
}

impl Progress {
    fn new(lock: LockMode) -> Self {
        Progress {
            state: CheckoutState::Validating,
            lock,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            debug!(from = %self.state, to = %next, lock = %self.lock, "Checkout state");
            self.state = next;
        }
    }

    fn fail(self, error: CheckoutError) -> CheckoutAttempt {
        let failed_in = self.state.can_fail().then_some(self.state);
        match &error {
            CheckoutError::Persistence(_) => {
                tracing::error!(state = %self.state, lock = %self.lock, error = %error, "Checkout failed");
            }
            _ => {
                warn!(state = %self.state, lock = %self.lock, error = %error, "Checkout rejected");
            }
        }
        CheckoutAttempt {
            failed_in,
            result: Err(error),
        }
    }
}

/// Coordinates the Inventory Store, Pricing Calculator and Transaction
/// Writer under one unit of work.
#[derive(Debug, Clone)]
pub struct CheckoutService<S> {
    store: S,
}

impl<S: UnitOfWorkFactory> CheckoutService<S> {
    pub fn new(store: S) -> Self {
        CheckoutService { store }
    }

    /// Runs a checkout.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let receipt = db
    ///     .checkout()
    ///     .checkout(&[CheckoutItem::new(1, 3)], LockMode::Pessimistic)
    ///     .await?;
    /// ```
    pub async fn checkout(
        &self,
        items: &[CheckoutItem],
        lock: LockMode,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        self.attempt(items, lock).await.result
    }

    /// Same as [`checkout`](Self::checkout), also reporting where a failure
    /// happened.
    pub async fn attempt(&self, items: &[CheckoutItem], lock: LockMode) -> CheckoutAttempt {
        let mut progress = Progress::new(lock);

        let cart = match normalize_cart(items) {
            Ok(cart) => cart,
            Err(err) => return progress.fail(err),
        };
        progress.advance();

        let mut uow = match self.store.begin().await {
            Ok(uow) => uow,
            Err(err) => return progress.fail(err.into()),
        };

        match run_in_unit(&mut progress, &mut uow, &cart).await {
            Ok(receipt) => match uow.commit().await {
                Ok(()) => {
                    progress.advance();
                    info!(
                        transaction_id = %receipt.transaction_id,
                        total = %receipt.total_amount_cents,
                        lines = receipt.lines.len(),
                        %lock,
                        "Checkout committed"
                    );
                    CheckoutAttempt {
                        failed_in: None,
                        result: Ok(receipt),
                    }
                }
                Err(err) => progress.fail(err.into()),
            },
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed; connection drop will discard the transaction");
                }
                progress.fail(err)
            }
        }
    }
}

/// Pricing, Persisting and Adjusting. Leaves commit/rollback to the caller.
async fn run_in_unit<U: UnitOfWork>(
    progress: &mut Progress,
    uow: &mut U,
    cart: &[CheckoutItem],
) -> Result<CheckoutReceipt, CheckoutError> {
    // Pricing
    let mut rows = Vec::with_capacity(cart.len());
    for item in cart {
        let row = inventory::get_for_update(uow, item.product_id, progress.lock).await?;
        if item.quantity > row.stock {
            return Err(CheckoutError::InsufficientStock {
                product_id: item.product_id,
                available: row.stock,
                requested: item.quantity,
            });
        }
        rows.push(row);
    }

    let inputs: Vec<PriceInput> = cart
        .iter()
        .zip(&rows)
        .map(|(item, row)| {
            PriceInput::new(item.product_id, Money::from_cents(row.price_cents), item.quantity)
        })
        .collect();
    let priced = price_cart(&inputs).map_err(|err| match err {
        CoreError::AmountOverflow => {
            CheckoutError::InvalidRequest("cart total is too large".to_string())
        }
        other => CheckoutError::InvalidRequest(other.to_string()),
    })?;
    progress.advance();

    // Persisting
    let pending: Vec<PendingLine> = priced
        .lines
        .iter()
        .zip(rows)
        .map(|(line, row)| PendingLine {
            product_id: line.product_id,
            product_name: row.name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            subtotal: line.subtotal,
        })
        .collect();
    let created_at = Utc::now();
    let written = writer::create_transaction(uow, priced.total, &pending, created_at).await?;
    progress.advance();

    // Adjusting
    for item in cart {
        inventory::decrement_stock(uow, item.product_id, item.quantity).await?;
    }

    let lines = pending
        .into_iter()
        .zip(written.line_ids)
        .map(|(line, line_id)| ReceiptLine {
            line_id,
            product_id: line.product_id,
            product_name: line.product_name,
            unit_price_cents: line.unit_price,
            quantity: line.quantity,
            subtotal_cents: line.subtotal,
        })
        .collect();

    Ok(CheckoutReceipt {
        transaction_id: written.transaction_id,
        total_amount_cents: priced.total,
        lines,
        created_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
