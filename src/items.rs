//! Items
//!
//! Line items are priced catalog selections. Prices are copied out of the catalog when the
//! line item is built, so later menu changes never reprice an existing line item.

use std::fmt;

use thiserror::Error;

use crate::{
    catalog::{Catalog, PriceSpec},
    prices::Price,
};

/// Smallest quantity accepted for a line item.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity accepted for a line item.
pub const MAX_QUANTITY: u32 = 100;

/// Errors raised while building a line item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineItemError {
    /// The item is not on the menu.
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    /// The item has portion sizes but none was chosen.
    #[error("{0} needs a portion size")]
    MissingPortion(String),

    /// The chosen portion does not exist for the item.
    #[error("{item} has {available} portions, portion index {portion} is out of range")]
    InvalidPortion {
        /// Item name
        item: String,
        /// Requested zero-based portion index
        portion: usize,
        /// Number of portions the item has
        available: usize,
    },

    /// The quantity is outside `1..=100`.
    #[error("Quantity must be between 1 and 100, got {0}")]
    InvalidQuantity(i64),
}

/// A validated quantity in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::InvalidQuantity`] if the value is outside `1..=100`.
    pub fn new(value: i64) -> Result<Self, LineItemError> {
        u32::try_from(value)
            .ok()
            .filter(|qty| (MIN_QUANTITY..=MAX_QUANTITY).contains(qty))
            .map(Quantity)
            .ok_or(LineItemError::InvalidQuantity(value))
    }

    /// The quantity as an integer.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A priced, quantified catalog selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    item_name: String,
    portion: Option<usize>,
    quantity: Quantity,
    unit_price: Price,
    subtotal: Price,
}

impl LineItem {
    /// Build a line item from a catalog selection.
    ///
    /// `portion` is a zero-based index into the item's portion prices. It is required for
    /// items with portion sizes and ignored for single-price items.
    ///
    /// # Errors
    ///
    /// - [`LineItemError::UnknownItem`]: the item is not in the catalog.
    /// - [`LineItemError::MissingPortion`]: the item has portions and none was given.
    /// - [`LineItemError::InvalidPortion`]: the portion index is out of range.
    /// - [`LineItemError::InvalidQuantity`]: the quantity is outside `1..=100`.
    pub fn build(
        catalog: &Catalog,
        item_name: &str,
        portion: Option<usize>,
        quantity: i64,
    ) -> Result<Self, LineItemError> {
        let entry = catalog
            .get(item_name)
            .ok_or_else(|| LineItemError::UnknownItem(item_name.to_string()))?;

        let (portion, unit_price) = match &entry.prices {
            PriceSpec::Single(price) => (None, *price),
            PriceSpec::Portions(prices) => {
                let index =
                    portion.ok_or_else(|| LineItemError::MissingPortion(entry.name.clone()))?;

                let price = prices
                    .get(index)
                    .copied()
                    .ok_or_else(|| LineItemError::InvalidPortion {
                        item: entry.name.clone(),
                        portion: index,
                        available: prices.len(),
                    })?;

                (Some(index), price)
            }
        };

        let quantity = Quantity::new(quantity)?;

        Ok(LineItem {
            item_name: entry.name.clone(),
            portion,
            quantity,
            unit_price,
            subtotal: unit_price.times(quantity.get()),
        })
    }

    /// Returns the item name
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Returns the zero-based portion index, if the item has portions
    pub fn portion(&self) -> Option<usize> {
        self.portion
    }

    /// Returns the quantity
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the unit price captured at build time
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Returns `quantity × unit_price`
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// `(Portion N)` with a one-based N, or `None` for single-price items.
    pub fn portion_note(&self) -> Option<String> {
        self.portion
            .map(|index| format!("(Portion {})", index.saturating_add(1)))
    }

    /// `"2 x Wings (Portion 2)"`, the form used in order summaries.
    pub fn summary(&self) -> String {
        match self.portion_note() {
            Some(note) => format!("{} x {} {note}", self.quantity, self.item_name),
            None => format!("{} x {}", self.quantity, self.item_name),
        }
    }
}
