//! # Pricing Calculator
//!
//! Pure line and cart totals on integer cents.
//!
//! ```text
//!   (product, unit price, qty) ──► subtotal = unit price × qty
//!                 ...                         │
//!   (product, unit price, qty) ──► subtotal ──┴──► total = Σ subtotals
//! ```
//!
//! No rounding happens anywhere: inputs are exact cents and the only
//! operations are multiplication and addition. Overflow is reported as
//! [`CoreError::AmountOverflow`] rather than wrapping.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// One priced input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceInput {
    pub product_id: i64,
    pub unit_price: Money,
    pub quantity: i64,
}

impl PriceInput {
    pub const fn new(product_id: i64, unit_price: Money, quantity: i64) -> Self {
        Self {
            product_id,
            unit_price,
            quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: i64,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub total: Money,
}

/// Subtotal of a single line.
pub fn line_subtotal(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    unit_price
        .checked_multiply_quantity(quantity)
        .ok_or(CoreError::AmountOverflow)
}

/// Prices every line and sums the total, preserving input order.
///
/// ## Example
/// ```rust
/// use cashier_core::money::Money;
/// use cashier_core::pricing::{price_cart, PriceInput};
///
/// let cart = price_cart(&[
///     PriceInput::new(1, Money::from_cents(1000), 10),
///     PriceInput::new(2, Money::from_cents(1500), 2),
/// ])
/// .unwrap();
///
/// assert_eq!(cart.lines[0].subtotal.cents(), 10_000);
/// assert_eq!(cart.total.cents(), 13_000);
/// ```
pub fn price_cart(inputs: &[PriceInput]) -> CoreResult<PricedCart> {
    let mut total = Money::zero();
    let mut lines = Vec::with_capacity(inputs.len());

    for input in inputs {
        let subtotal = line_subtotal(input.unit_price, input.quantity)?;
        total = total.checked_add(subtotal).ok_or(CoreError::AmountOverflow)?;
        lines.push(PricedLine {
            product_id: input.product_id,
            unit_price: input.unit_price,
            quantity: input.quantity,
            subtotal,
        });
    }

    Ok(PricedCart { lines, total })
}
