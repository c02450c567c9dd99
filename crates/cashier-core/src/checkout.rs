//! # Checkout Rules
//!
//! The pure half of checkout: the state machine the orchestrator walks
//! through, the lock mode, and cart normalization. The I/O half lives in
//! `cashier_db::checkout`.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Validating ──► Pricing ──► Persisting ──► Adjusting ──► Committed     │
//! │      │             │            │              │                        │
//! │      └─────────────┴────────────┴──────────────┴──────► Failed         │
//! │                                                                         │
//! │  Committed and Failed are terminal.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::types::CheckoutItem;
use crate::validation::{validate_id, validate_quantity};

// =============================================================================
// Checkout State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    Validating,
    Pricing,
    Persisting,
    Adjusting,
    Committed,
    Failed,
}

impl CheckoutState {
    /// The state that follows a successful step, or `None` from a
    /// terminal state.
    pub const fn next(self) -> Option<CheckoutState> {
        match self {
            CheckoutState::Validating => Some(CheckoutState::Pricing),
            CheckoutState::Pricing => Some(CheckoutState::Persisting),
            CheckoutState::Persisting => Some(CheckoutState::Adjusting),
            CheckoutState::Adjusting => Some(CheckoutState::Committed),
            CheckoutState::Committed | CheckoutState::Failed => None,
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, CheckoutState::Committed | CheckoutState::Failed)
    }

    /// `Failed` is reachable from every non-terminal state.
    #[inline]
    pub const fn can_fail(self) -> bool {
        !self.is_terminal()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CheckoutState::Validating => "validating",
            CheckoutState::Pricing => "pricing",
            CheckoutState::Persisting => "persisting",
            CheckoutState::Adjusting => "adjusting",
            CheckoutState::Committed => "committed",
            CheckoutState::Failed => "failed",
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lock Mode
// =============================================================================

/// How the inventory rows are protected while a checkout runs.
///
/// ```text
/// Pessimistic: lock ─► read ─► ... ─► write ─► commit   (others wait)
/// Optimistic:  read ─► ... ─► conditional write          (losers fail)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    /// Take an exclusive lock before reading stock; hold it to commit.
    Pessimistic,
    /// Read without locking; rely on the conditional stock decrement.
    Optimistic,
}

impl LockMode {
    #[inline]
    pub const fn is_pessimistic(self) -> bool {
        matches!(self, LockMode::Pessimistic)
    }
}

/// The wire format carries a `use_lock` flag.
impl From<bool> for LockMode {
    fn from(use_lock: bool) -> Self {
        if use_lock {
            LockMode::Pessimistic
        } else {
            LockMode::Optimistic
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockMode::Pessimistic => f.write_str("pessimistic"),
            LockMode::Optimistic => f.write_str("optimistic"),
        }
    }
}

// =============================================================================
// Cart Normalization
// =============================================================================

/// Validates a cart and merges entries for the same product.
///
/// The result holds one item per distinct product, ordered by ascending
/// product id, so locks are always acquired in the same order.
///
/// ## Errors
/// `InvalidRequest` for an empty cart, a non-positive quantity or product
/// id, or a merged quantity that overflows.
///
/// ## Example
/// ```rust
/// use cashier_core::checkout::normalize_cart;
/// use cashier_core::CheckoutItem;
///
/// let cart = normalize_cart(&[
///     CheckoutItem::new(2, 1),
///     CheckoutItem::new(1, 2),
///     CheckoutItem::new(2, 3),
/// ])
/// .unwrap();
///
/// assert_eq!(cart, vec![CheckoutItem::new(1, 2), CheckoutItem::new(2, 4)]);
/// ```
pub fn normalize_cart(items: &[CheckoutItem]) -> Result<Vec<CheckoutItem>, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::InvalidRequest(
            "cart must contain at least one item".to_string(),
        ));
    }

    let mut merged: BTreeMap<i64, i64> = BTreeMap::new();
    for item in items {
        validate_id("product_id", item.product_id)?;
        validate_quantity(item.quantity)?;

        let quantity = merged.entry(item.product_id).or_insert(0);
        *quantity = quantity.checked_add(item.quantity).ok_or_else(|| {
            CheckoutError::InvalidRequest(format!(
                "quantity for product {} is too large",
                item.product_id
            ))
        })?;
    }

    Ok(merged
        .into_iter()
        .map(|(product_id, quantity)| CheckoutItem::new(product_id, quantity))
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
