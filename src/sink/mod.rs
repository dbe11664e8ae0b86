//! Order Sinks
//!
//! A sink durably stores finalized orders as flat rows. Sinks only ever append; nothing is
//! read back or rewritten.

use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orders::{Order, PaymentMethod};

pub mod csv;
pub mod memory;

pub use self::{csv::CsvOrderSink, memory::MemoryOrderSink};

/// Errors raised while storing an order.
#[derive(Debug, Error)]
pub enum SinkError {
    /// IO error writing to the store
    #[error("Failed to write order: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error
    #[error("Failed to encode order row: {0}")]
    Csv(#[from] ::csv::Error),
}

/// The flat form an order is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    /// `HC-<YYYYMMDDHHMMSS>-<NNNN>`
    pub order_id: String,

    /// `YYYY-MM-DD HH:MM:SS`
    pub order_datetime: String,

    /// Line summaries joined with `"; "`
    pub items_summary: String,

    /// Order total in whole currency units
    pub total_amount: u64,

    /// `Cash` or `UPI`
    pub payment_method: PaymentMethod,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        OrderRow {
            order_id: order.order_id().to_string(),
            order_datetime: order.created_at_display(),
            items_summary: order.items_summary(),
            total_amount: *order.total_amount(),
            payment_method: order.payment_method(),
        }
    }
}

/// Somewhere finalized orders are appended to.
#[automock]
pub trait OrderSink {
    /// Append one order row.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the row could not be stored.
    fn append(&mut self, row: &OrderRow) -> Result<(), SinkError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        cart::Cart,
        catalog::{Catalog, CatalogEntry},
        items::LineItem,
        orders::FixedSuffix,
    };

    use super::*;

    #[test]
    fn row_from_order() -> TestResult {
        let catalog = Catalog::with_entries(
            "Test",
            [
                CatalogEntry::portions("Wings", &[80, 130]),
                CatalogEntry::single("Fries", 70),
            ],
        )?;

        let mut cart = Cart::new();
        cart.append(LineItem::build(&catalog, "Wings", Some(1), 2)?);
        cart.append(LineItem::build(&catalog, "Fries", None, 1)?);

        let mut suffix = FixedSuffix::new(4242).ok_or("invalid suffix")?;
        let order = Order::finalize(
            &cart,
            PaymentMethod::Upi,
            date(2024, 3, 1).at(10, 0, 0, 0),
            &mut suffix,
        )?;

        let row = OrderRow::from(&order);

        assert_eq!(
            row,
            OrderRow {
                order_id: "HC-20240301100000-4242".to_string(),
                order_datetime: "2024-03-01 10:00:00".to_string(),
                items_summary: "2 x Wings (Portion 2); 1 x Fries".to_string(),
                total_amount: 330,
                payment_method: PaymentMethod::Upi,
            }
        );

        Ok(())
    }
}
