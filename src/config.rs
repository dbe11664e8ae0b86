//! Command-line configuration

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::{
    catalog::{Catalog, config::MenuError},
    orders::PaymentMethod,
};

/// The Hot Chick order counter
#[derive(Debug, Parser)]
#[command(name = "hotchick", about = "The Hot Chick order counter", long_about = None)]
pub struct AppConfig {
    /// Menu YAML file; the built-in menu is used when omitted
    #[arg(long, env = "HOTCHICK_MENU", global = true)]
    pub menu: Option<PathBuf>,

    /// CSV file orders are appended to
    #[arg(long, env = "HOTCHICK_ORDERS", default_value = "orders.csv", global = true)]
    pub orders: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Load the configured menu, falling back to the built-in one.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the menu cannot be read or is invalid.
    pub fn catalog(&self) -> Result<Catalog, MenuError> {
        match &self.menu {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line logs
    Compact,

    /// One JSON object per event
    Json,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the menu
    Menu,

    /// Build a cart and place an order
    Order(OrderArgs),
}

/// Arguments for placing an order
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Item to add, as `ITEM[@PORTION][*QTY]`; portions are numbered from 1 as on the menu
    #[arg(short = 'i', long = "line", required = true)]
    pub lines: Vec<LineSpec>,

    /// How the order is paid for
    #[arg(short, long, value_enum, default_value_t = PaymentMethod::Cash)]
    pub payment: PaymentMethod,

    /// Keep the order in memory instead of appending it to the orders file
    #[arg(long)]
    pub dry_run: bool,
}

/// Errors parsing an item argument.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineSpecError {
    /// No item name before the portion/quantity
    #[error("Missing item name in {0:?}")]
    MissingItem(String),

    /// Portion is not a positive number
    #[error("Portion must be a number starting at 1, got {0:?}")]
    InvalidPortion(String),

    /// Quantity is not a number
    #[error("Quantity must be a number, got {0:?}")]
    InvalidQuantity(String),
}

/// One `--line` argument: an item name with an optional portion and quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    /// Menu item name
    pub item: String,

    /// Zero-based portion index
    pub portion: Option<usize>,

    /// Requested quantity, validated when the line item is built
    pub quantity: i64,
}

impl FromStr for LineSpec {
    type Err = LineSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, quantity) = match s.rsplit_once('*') {
            Some((rest, qty)) => {
                let quantity = qty
                    .trim()
                    .parse::<i64>()
                    .map_err(|_err| LineSpecError::InvalidQuantity(qty.to_string()))?;

                (rest, quantity)
            }
            None => (s, 1),
        };

        let (item, portion) = match rest.rsplit_once('@') {
            Some((item, portion)) => {
                let index = portion
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .ok_or_else(|| LineSpecError::InvalidPortion(portion.to_string()))?;

                (item, Some(index))
            }
            None => (rest, None),
        };

        let item = item.trim();

        if item.is_empty() {
            return Err(LineSpecError::MissingItem(s.to_string()));
        }

        Ok(LineSpec {
            item: item.to_string(),
            portion,
            quantity,
        })
    }
}
