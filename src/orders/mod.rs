//! Orders

use std::fmt;

use clap::ValueEnum;
use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::Cart, items::LineItem, prices::Price};

pub mod id;

pub use id::{FixedSuffix, OrderId, SuffixSource};

/// Format used for the order timestamp in receipts and stored rows.
pub const ORDER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returned when trying to place an order with nothing in the cart.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Cart is empty, add some items first")]
pub struct EmptyCartError;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum PaymentMethod {
    /// Cash on pickup
    #[serde(rename = "Cash")]
    Cash,

    /// UPI transfer
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    /// Display label, as stored with the order.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A finalized order. Never changes after it is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    order_id: OrderId,
    created_at: DateTime,
    line_items: Vec<LineItem>,
    total_amount: Price,
    payment_method: PaymentMethod,
}

impl Order {
    /// Snapshot a cart into an order.
    ///
    /// The cart itself is left untouched; callers clear it once the order has been stored.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCartError`] if the cart has no line items.
    pub fn finalize(
        cart: &Cart,
        payment_method: PaymentMethod,
        now: DateTime,
        suffix_source: &mut impl SuffixSource,
    ) -> Result<Self, EmptyCartError> {
        if cart.is_empty() {
            return Err(EmptyCartError);
        }

        Ok(Order {
            order_id: OrderId::generate(now, suffix_source),
            created_at: now,
            line_items: cart.entries().to_vec(),
            total_amount: cart.total(),
            payment_method,
        })
    }

    /// Order identifier
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// `created_at` as `YYYY-MM-DD HH:MM:SS`
    pub fn created_at_display(&self) -> String {
        self.created_at.strftime(ORDER_DATETIME_FORMAT).to_string()
    }

    /// Line items, as they were in the cart
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Sum of line item subtotals
    pub fn total_amount(&self) -> Price {
        self.total_amount
    }

    /// Payment method
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Line summaries joined with `"; "`.
    pub fn items_summary(&self) -> String {
        self.line_items
            .iter()
            .map(LineItem::summary)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
