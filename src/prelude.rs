//! Hot Chick prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogEntry, CatalogError, PriceSpec, config::MenuError},
    items::{LineItem, LineItemError, Quantity},
    orders::{EmptyCartError, FixedSuffix, Order, OrderId, PaymentMethod, SuffixSource},
    prices::Price,
    receipt::{Receipt, ReceiptError, write_cart, write_menu},
    session::{CheckoutError, OrderingSession, SessionState},
    sink::{CsvOrderSink, MemoryOrderSink, OrderRow, OrderSink, SinkError},
};
