//! Menu Configuration
//!
//! Menus are YAML documents listing items in display order, each with either one price or a
//! list of portion prices:
//!
//! ```yaml
//! name: The Hot Chick
//! currency: INR
//! items:
//!   - name: Fried chicken wings (3pc/5pc)
//!     price: [80, 130]
//!   - name: French Fries
//!     price: 70
//! ```

use std::{fs, path::Path};

use rusty_money::iso::{Currency, EUR, GBP, INR, USD};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogEntry, CatalogError, PriceSpec},
    prices::Price,
};

/// The menu shipped with the binary.
const BUILTIN_MENU: &str = include_str!("../../menus/hot-chick.yml");

/// Menu loading errors
#[derive(Debug, Error)]
pub enum MenuError {
    /// IO error reading the menu file
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid menu entry
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Menu document
#[derive(Debug, Deserialize)]
pub struct MenuConfig {
    /// Menu display name
    pub name: String,

    /// ISO currency code, defaults to INR
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Items in display order
    pub items: Vec<MenuItemConfig>,
}

/// Menu item
#[derive(Debug, Deserialize)]
pub struct MenuItemConfig {
    /// Item name
    pub name: String,

    /// A single price or a list of portion prices
    pub price: PriceConfig,
}

/// Either shape of price accepted in a menu file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceConfig {
    /// `price: 70`
    Single(u64),

    /// `price: [80, 130]`
    Portions(Vec<u64>),
}

impl PriceConfig {
    fn into_spec(self, name: &str) -> Result<PriceSpec, CatalogError> {
        let prices: Vec<Price> = match self {
            PriceConfig::Single(price) => vec![Price::new(price)],
            PriceConfig::Portions(prices) => prices.into_iter().map(Price::new).collect(),
        };

        PriceSpec::from_prices(name, &prices)
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

impl TryFrom<MenuConfig> for Catalog {
    type Error = MenuError;

    fn try_from(config: MenuConfig) -> Result<Self, Self::Error> {
        let currency = parse_currency(&config.currency)?;
        let mut catalog = Catalog::new(config.name, currency);

        for item in config.items {
            let prices = item.price.into_spec(&item.name)?;

            catalog.insert(CatalogEntry {
                name: item.name,
                prices,
            })?;
        }

        Ok(catalog)
    }
}

/// Parse an ISO currency code.
///
/// # Errors
///
/// Returns [`MenuError::UnknownCurrency`] if the code is not supported.
pub fn parse_currency(code: &str) -> Result<&'static Currency, MenuError> {
    match code.trim() {
        "INR" => Ok(INR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(MenuError::UnknownCurrency(other.to_string())),
    }
}

impl Catalog {
    /// Parse a catalog from a YAML menu document.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the YAML is malformed or any entry is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, MenuError> {
        let config: MenuConfig = serde_norway::from_str(contents)?;

        Catalog::try_from(config)
    }

    /// Load a catalog from a YAML menu file.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Catalog::from_yaml(&contents)?;

        debug!(path = %path.display(), items = catalog.len(), "loaded menu");

        Ok(catalog)
    }

    /// The built-in menu.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the embedded menu is invalid.
    pub fn builtin() -> Result<Self, MenuError> {
        Catalog::from_yaml(BUILTIN_MENU)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builtin_menu_loads() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert_eq!(catalog.name(), "The Hot Chick");
        assert_eq!(catalog.currency(), INR);
        assert_eq!(catalog.len(), 47);

        let wings = catalog
            .get("Fried chicken wings (3pc/5pc)")
            .ok_or("missing wings")?;

        assert_eq!(wings.prices.prices(), &[Price::new(80), Price::new(130)]);

        let fries = catalog.get("French Fries").ok_or("missing fries")?;

        assert_eq!(fries.prices, PriceSpec::Single(Price::new(70)));

        Ok(())
    }

    #[test]
    fn currency_defaults_to_inr() -> TestResult {
        let catalog = Catalog::from_yaml("name: Test\nitems:\n  - name: Fries\n    price: 70\n")?;

        assert_eq!(catalog.currency(), INR);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = Catalog::from_yaml("name: Test\ncurrency: ABC\nitems: []\n");

        assert!(matches!(result, Err(MenuError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn zero_price_is_rejected() {
        let result = Catalog::from_yaml("name: Test\nitems:\n  - name: Fries\n    price: 0\n");

        assert!(matches!(
            result,
            Err(MenuError::Catalog(CatalogError::ZeroPrice(name))) if name == "Fries"
        ));
    }

    #[test]
    fn empty_portions_are_rejected() {
        let result = Catalog::from_yaml("name: Test\nitems:\n  - name: Wings\n    price: []\n");

        assert!(matches!(
            result,
            Err(MenuError::Catalog(CatalogError::NoPrices(name))) if name == "Wings"
        ));
    }

    #[test]
    fn duplicate_items_are_rejected() {
        let yaml = "name: Test\nitems:\n  - name: Fries\n    price: 70\n  - name: Fries\n    price: 80\n";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(
            result,
            Err(MenuError::Catalog(CatalogError::DuplicateItem(name))) if name == "Fries"
        ));
    }

    #[test]
    fn negative_price_is_a_yaml_error() {
        let result = Catalog::from_yaml("name: Test\nitems:\n  - name: Fries\n    price: -5\n");

        assert!(matches!(result, Err(MenuError::Yaml(_))));
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("menu.yml");

        fs::write(
            &path,
            "name: Test\ncurrency: GBP\nitems:\n  - name: Wings\n    price: [80, 130]\n",
        )?;

        let catalog = Catalog::load(&path)?;

        assert_eq!(catalog.currency(), GBP);
        assert!(catalog.get("Wings").is_some_and(|e| e.prices.has_portions()));

        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Catalog::load("/nonexistent/menu.yml");

        assert!(matches!(result, Err(MenuError::Io(_))));
    }
}
