//! Ordering Session
//!
//! One customer's pass through the menu: items are added to a cart, then the cart is turned
//! into an order and handed to a sink. The session owns its cart outright; nothing is shared
//! between sessions.
//!
//! ```text
//! Empty -> Building (add*) -> place order -> Submitted (sink append) -> Empty
//! ```

use jiff::{Zoned, civil::DateTime};
use thiserror::Error;
use tracing::{Span, info, warn};

use crate::{
    cart::Cart,
    catalog::Catalog,
    items::{LineItem, LineItemError},
    orders::{EmptyCartError, Order, PaymentMethod, SuffixSource},
    sink::{OrderRow, OrderSink, SinkError},
};

/// Errors raised while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order. The sink was not contacted.
    #[error(transparent)]
    EmptyCart(#[from] EmptyCartError),

    /// The order was built but could not be stored. The cart is left as it was.
    #[error("Order {} could not be stored: {source}", .order.order_id())]
    Sink {
        /// The order that failed to store
        order: Box<Order>,

        /// Why the sink failed
        source: SinkError,
    },
}

impl CheckoutError {
    /// The unsaved order, if one was built.
    pub fn order(&self) -> Option<&Order> {
        match self {
            CheckoutError::EmptyCart(_) => None,
            CheckoutError::Sink { order, .. } => Some(order),
        }
    }
}

/// Where the session is in the ordering flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No items in the cart
    Empty,

    /// At least one item in the cart
    Building,
}

/// A single customer's ordering session.
#[derive(Debug)]
pub struct OrderingSession<'a> {
    catalog: &'a Catalog,
    cart: Cart,
}

impl<'a> OrderingSession<'a> {
    /// Start a session with an empty cart.
    pub fn start(catalog: &'a Catalog) -> Self {
        OrderingSession {
            catalog,
            cart: Cart::new(),
        }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current state of the ordering flow.
    pub fn state(&self) -> SessionState {
        if self.cart.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Building
        }
    }

    /// Build a line item and add it to the cart, returning a copy of what was added.
    ///
    /// # Errors
    ///
    /// Returns a [`LineItemError`] if the selection is invalid, leaving the cart unchanged.
    #[tracing::instrument(skip(self), fields(subtotal = tracing::field::Empty))]
    pub fn add(
        &mut self,
        item_name: &str,
        portion: Option<usize>,
        quantity: i64,
    ) -> Result<LineItem, LineItemError> {
        let item = LineItem::build(self.catalog, item_name, portion, quantity)
            .inspect_err(|error| warn!(%error, "rejected cart item"))?;

        Span::current().record("subtotal", *item.subtotal());

        info!(summary = %item.summary(), "added to cart");

        self.cart.append(item.clone());

        Ok(item)
    }

    /// Finalize the cart into an order and append it to `sink`.
    ///
    /// The cart is cleared only once the sink has accepted the order. If the sink fails, the
    /// built order is returned inside [`CheckoutError::Sink`] and the cart is kept so the
    /// order can be resubmitted.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart is empty; the sink is not contacted.
    /// - [`CheckoutError::Sink`]: the sink failed to store the order.
    #[tracing::instrument(skip(self, suffix_source, sink), fields(order_id = tracing::field::Empty))]
    pub fn place_order(
        &mut self,
        payment_method: PaymentMethod,
        now: DateTime,
        suffix_source: &mut impl SuffixSource,
        sink: &mut impl OrderSink,
    ) -> Result<Order, CheckoutError> {
        let order = Order::finalize(&self.cart, payment_method, now, suffix_source)
            .inspect_err(|_| warn!("tried to place an order with an empty cart"))?;

        Span::current().record("order_id", order.order_id().as_str());

        if let Err(source) = sink.append(&OrderRow::from(&order)) {
            warn!(error = %source, "order not stored, keeping cart");

            return Err(CheckoutError::Sink {
                order: Box::new(order),
                source,
            });
        }

        info!(
            total = *order.total_amount(),
            items = order.line_items().len(),
            "order placed"
        );

        self.cart.clear();

        Ok(order)
    }

    /// [`place_order`](Self::place_order) using the local clock and a thread-local RNG.
    ///
    /// # Errors
    ///
    /// See [`place_order`](Self::place_order).
    pub fn place_order_now(
        &mut self,
        payment_method: PaymentMethod,
        sink: &mut impl OrderSink,
    ) -> Result<Order, CheckoutError> {
        let now = Zoned::now().datetime();

        self.place_order(payment_method, now, &mut rand::thread_rng(), sink)
    }

    /// End the session, handing back whatever is left in the cart.
    pub fn finish(self) -> Cart {
        self.cart
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        catalog::{CatalogEntry, CatalogError},
        orders::FixedSuffix,
        prices::Price,
        sink::{MemoryOrderSink, MockOrderSink},
    };

    use super::*;

    fn test_catalog() -> Result<Catalog, CatalogError> {
        Catalog::with_entries(
            "Test",
            [
                CatalogEntry::portions("Wings", &[80, 130]),
                CatalogEntry::single("Fries", 70),
            ],
        )
    }

    fn noon() -> DateTime {
        date(2024, 3, 1).at(12, 0, 0, 0)
    }

    #[test]
    fn start_is_empty() -> TestResult {
        let catalog = test_catalog()?;
        let session = OrderingSession::start(&catalog);

        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn add_moves_to_building() -> TestResult {
        let catalog = test_catalog()?;
        let mut session = OrderingSession::start(&catalog);

        let item = session.add("Wings", Some(0), 3)?;

        assert_eq!(item.subtotal(), Price::new(240));
        assert_eq!(session.state(), SessionState::Building);

        Ok(())
    }

    #[test]
    fn invalid_add_leaves_cart_unchanged() -> TestResult {
        let catalog = test_catalog()?;
        let mut session = OrderingSession::start(&catalog);

        session.add("Fries", None, 1)?;

        assert!(session.add("Wings", None, 1).is_err());
        assert!(session.add("Fries", None, 0).is_err());
        assert!(session.add("Burger", None, 1).is_err());

        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.cart().total(), Price::new(70));

        Ok(())
    }

    #[test]
    fn empty_cart_does_not_contact_sink() -> TestResult {
        let catalog = test_catalog()?;
        let mut session = OrderingSession::start(&catalog);
        let mut sink = MockOrderSink::new();
        let mut suffix = FixedSuffix::new(1000).ok_or("invalid suffix")?;

        sink.expect_append().never();

        let result = session.place_order(PaymentMethod::Cash, noon(), &mut suffix, &mut sink);

        assert!(matches!(result, Err(CheckoutError::EmptyCart(EmptyCartError))));
        assert_eq!(session.state(), SessionState::Empty);

        Ok(())
    }

    #[test]
    fn successful_order_clears_cart() -> TestResult {
        let catalog = test_catalog()?;
        let mut session = OrderingSession::start(&catalog);
        let mut sink = MemoryOrderSink::new();
        let mut suffix = FixedSuffix::new(4242).ok_or("invalid suffix")?;

        session.add("Fries", None, 2)?;

        let order = session.place_order(PaymentMethod::Cash, noon(), &mut suffix, &mut sink)?;

        assert_eq!(order.total_amount(), Price::new(140));
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(sink.rows().len(), 1);
        assert_eq!(
            sink.rows().first().map(|row| row.order_id.as_str()),
            Some("HC-20240301120000-4242")
        );

        Ok(())
    }

    #[test]
    fn sink_failure_keeps_cart() -> TestResult {
        let catalog = test_catalog()?;
        let mut session = OrderingSession::start(&catalog);
        let mut sink = MockOrderSink::new();
        let mut suffix = FixedSuffix::new(4242).ok_or("invalid suffix")?;

        sink.expect_append()
            .times(1)
            .returning(|_| Err(SinkError::Io(std::io::Error::other("quota exceeded"))));

        session.add("Wings", Some(1), 2)?;

        let result = session.place_order(PaymentMethod::Upi, noon(), &mut suffix, &mut sink);

        let order = result
            .as_ref()
            .err()
            .and_then(CheckoutError::order)
            .ok_or("expected the unsaved order")?;

        assert_eq!(order.total_amount(), Price::new(260));
        assert_eq!(session.state(), SessionState::Building);
        assert_eq!(session.cart().total(), Price::new(260));

        Ok(())
    }

    #[test]
    fn finish_returns_leftover_cart() -> TestResult {
        let catalog = test_catalog()?;
        let mut session = OrderingSession::start(&catalog);

        session.add("Fries", None, 1)?;

        let cart = session.finish();

        assert_eq!(cart.len(), 1);

        Ok(())
    }
}
