//! Cart

use crate::{items::LineItem, prices::Price};

/// An ordered collection of line items owned by one ordering session.
///
/// Items can only be appended or cleared all at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Add a line item to the end of the cart.
    pub fn append(&mut self, item: LineItem) {
        self.entries.push(item);
    }

    /// Sum of all line item subtotals.
    pub fn total(&self) -> Price {
        self.entries.iter().map(LineItem::subtotal).sum()
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get a line item by its position.
    pub fn get(&self, idx: usize) -> Option<&LineItem> {
        self.entries.get(idx)
    }

    /// Iterate over the line items in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.entries.iter()
    }

    /// The line items in the order they were added.
    pub fn entries(&self) -> &[LineItem] {
        &self.entries
    }

    /// Get the number of line items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
