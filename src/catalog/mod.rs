//! Catalog
//!
//! The menu an ordering session prices against. Entries keep their menu order and are
//! looked up by name.

use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, INR};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::prices::Price;

pub mod config;

new_key_type! {
    /// Catalog entry key
    struct ItemKey;
}

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two entries share the same name.
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),

    /// An entry has a zero price.
    #[error("Menu item {0} has a zero price")]
    ZeroPrice(String),

    /// An entry has an empty list of portion prices.
    #[error("Menu item {0} has no prices")]
    NoPrices(String),
}

/// The price (or prices) of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSpec {
    /// One price, no portion choice.
    Single(Price),

    /// Selectable portion sizes, in menu order.
    Portions(SmallVec<[Price; 2]>),
}

impl PriceSpec {
    /// Build a price spec from a list of prices.
    ///
    /// A one-element list is a single price.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoPrices`] for an empty list and [`CatalogError::ZeroPrice`]
    /// if any price is zero. `name` is only used for the error.
    pub fn from_prices(name: &str, prices: &[Price]) -> Result<Self, CatalogError> {
        if prices.iter().any(|price| price.is_zero()) {
            return Err(CatalogError::ZeroPrice(name.to_string()));
        }

        match prices {
            [] => Err(CatalogError::NoPrices(name.to_string())),
            [price] => Ok(PriceSpec::Single(*price)),
            prices => Ok(PriceSpec::Portions(prices.iter().copied().collect())),
        }
    }

    /// Whether the entry needs a portion selection.
    #[must_use]
    pub fn has_portions(&self) -> bool {
        matches!(self, PriceSpec::Portions(_))
    }

    /// Number of selectable portions (1 for a single price).
    #[must_use]
    pub fn portion_count(&self) -> usize {
        match self {
            PriceSpec::Single(_) => 1,
            PriceSpec::Portions(prices) => prices.len(),
        }
    }

    /// The price of the given portion, if there is one.
    #[must_use]
    pub fn portion(&self, index: usize) -> Option<Price> {
        match self {
            PriceSpec::Single(_) => None,
            PriceSpec::Portions(prices) => prices.get(index).copied(),
        }
    }

    /// All prices, in menu order.
    pub fn prices(&self) -> &[Price] {
        match self {
            PriceSpec::Single(price) => std::slice::from_ref(price),
            PriceSpec::Portions(prices) => prices.as_slice(),
        }
    }
}

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Item name, unique within a catalog
    pub name: String,

    /// Item price(s)
    pub prices: PriceSpec,
}

impl CatalogEntry {
    /// Creates an entry with a single price.
    pub fn single(name: impl Into<String>, price: u64) -> Self {
        CatalogEntry {
            name: name.into(),
            prices: PriceSpec::Single(Price::new(price)),
        }
    }

    /// Creates an entry with portion prices.
    pub fn portions(name: impl Into<String>, prices: &[u64]) -> Self {
        CatalogEntry {
            name: name.into(),
            prices: PriceSpec::Portions(prices.iter().copied().map(Price::new).collect()),
        }
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    name: String,
    entries: SlotMap<ItemKey, CatalogEntry>,
    order: Vec<ItemKey>,
    keys: FxHashMap<String, ItemKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in the given currency.
    pub fn new(name: impl Into<String>, currency: &'static Currency) -> Self {
        Catalog {
            name: name.into(),
            entries: SlotMap::with_key(),
            order: Vec::new(),
            keys: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog priced in rupees from the given entries.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any entry is invalid or duplicated.
    pub fn with_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = CatalogEntry>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(name, INR);

        for entry in entries {
            catalog.insert(entry)?;
        }

        Ok(catalog)
    }

    /// Add an entry to the end of the menu.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the name is already taken or the prices are invalid.
    pub fn insert(&mut self, entry: CatalogEntry) -> Result<(), CatalogError> {
        if self.keys.contains_key(&entry.name) {
            return Err(CatalogError::DuplicateItem(entry.name));
        }

        // Re-run validation so hand-built entries obey the same rules as loaded ones.
        let prices = PriceSpec::from_prices(&entry.name, entry.prices.prices())?;
        let name = entry.name.clone();
        let key = self.entries.insert(CatalogEntry {
            name: entry.name,
            prices,
        });

        self.order.push(key);
        self.keys.insert(name, key);

        Ok(())
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.keys.get(name).and_then(|key| self.entries.get(*key))
    }

    /// Iterate over the entries in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.order.iter().filter_map(|key| self.entries.get(*key))
    }

    /// Catalog display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currency the catalog is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
