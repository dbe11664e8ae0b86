//! Receipt
//!
//! Terminal tables for the menu, the cart, and placed orders.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{Catalog, PriceSpec},
    items::LineItem,
    orders::Order,
    prices::Price,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Confirmation shown after an order has been placed.
#[derive(Debug)]
pub struct Receipt<'a> {
    order: &'a Order,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Create a receipt for an order priced in `currency`.
    #[must_use]
    pub fn new(order: &'a Order, currency: &'static Currency) -> Self {
        Receipt { order, currency }
    }

    /// Writes the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        writeln!(out, "\nOrder placed! Order ID: {}", self.order.order_id())?;
        writeln!(out, "Date & Time: {}", self.order.created_at_display())?;

        let table = line_item_table(self.order.line_items(), self.currency);

        writeln!(out, "\n{table}")?;

        write_summary_line(
            &mut out,
            "Total Amount:",
            &money(self.order.total_amount(), self.currency),
        )?;

        write_summary_line(
            &mut out,
            "Payment Method:",
            self.order.payment_method().label(),
        )?;

        Ok(())
    }
}

/// Writes the cart contents and total.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn write_cart(
    mut out: impl io::Write,
    cart: &Cart,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let table = line_item_table(cart.entries(), currency);

    writeln!(out, "\n{table}")?;

    write_summary_line(&mut out, "Total:", &money(cart.total(), currency))?;

    Ok(())
}

/// Writes the menu, one row per item with its price or portion prices.
///
/// # Errors
///
/// Returns an error if the menu cannot be written.
pub fn write_menu(mut out: impl io::Write, catalog: &Catalog) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Price"]);

    for (idx, entry) in catalog.iter().enumerate() {
        builder.push_record([
            format!("{}", idx + 1),
            entry.name.clone(),
            price_cell(&entry.prices, catalog.currency()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(0..1), Alignment::right());

    writeln!(out, "{}\n{table}", catalog.name())?;

    Ok(())
}

fn price_cell(prices: &PriceSpec, currency: &'static Currency) -> String {
    match prices {
        PriceSpec::Single(price) => money(*price, currency),
        PriceSpec::Portions(prices) => prices
            .iter()
            .enumerate()
            .map(|(idx, price)| format!("Option {}: {}", idx + 1, money(*price, currency)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn line_item_table(items: &[LineItem], currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Qty", "Unit Price", "Subtotal"]);

    for (idx, item) in items.iter().enumerate() {
        let name = match item.portion_note() {
            Some(note) => format!("{} {note}", item.item_name()),
            None => item.item_name().to_string(),
        };

        builder.push_record([
            format!("{}", idx + 1),
            name,
            item.quantity().to_string(),
            money(item.unit_price(), currency),
            money(item.subtotal(), currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    table.to_string()
}

fn money(price: Price, currency: &'static Currency) -> String {
    format!("{}", price.to_money(currency))
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
) -> Result<(), ReceiptError> {
    writeln!(out, " {label} {value}")?;

    Ok(())
}
