//! Hot Chick order counter CLI

use std::{
    io::{self, Write},
    process,
};

use thiserror::Error;
use tracing::error;

use hotchick::{
    catalog::{Catalog, config::MenuError},
    config::{AppConfig, Command, OrderArgs},
    items::LineItemError,
    logging,
    receipt::{Receipt, ReceiptError, write_cart, write_menu},
    session::{CheckoutError, OrderingSession},
    sink::{CsvOrderSink, MemoryOrderSink, OrderSink},
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    LineItem(#[from] LineItemError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Hot Chick CLI entry point
pub fn main() {
    let config = AppConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = logging::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for logging errors"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }

    if let Err(error) = run(&config) {
        error!(%error, "command failed");

        #[expect(clippy::print_stderr, reason = "user-facing error message")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), CliError> {
    let catalog = config.catalog()?;
    let mut out = io::stdout().lock();

    match &config.command {
        Command::Menu => {
            write_menu(&mut out, &catalog)?;

            Ok(())
        }
        Command::Order(args) if args.dry_run => {
            place_order(&mut out, &catalog, args, &mut MemoryOrderSink::new())
        }
        Command::Order(args) => place_order(
            &mut out,
            &catalog,
            args,
            &mut CsvOrderSink::new(&config.orders),
        ),
    }
}

/// Build the cart from the `--line` arguments and store the order in `sink`.
///
/// A failed checkout is reported on `out` before the error is returned, and `main` exits
/// with status 1.
fn place_order(
    out: &mut impl Write,
    catalog: &Catalog,
    args: &OrderArgs,
    sink: &mut impl OrderSink,
) -> Result<(), CliError> {
    let mut session = OrderingSession::start(catalog);

    for line in &args.lines {
        let item = session.add(&line.item, line.portion, line.quantity)?;

        writeln!(out, "Added {}", item.summary())?;
    }

    write_cart(&mut *out, session.cart(), catalog.currency())?;

    let order = match session.place_order_now(args.payment, sink) {
        Ok(order) => order,
        Err(error) => {
            writeln!(
                out,
                "Order not placed; {} item(s) still in the cart.",
                session.cart().len()
            )?;

            return Err(error.into());
        }
    };

    Receipt::new(&order, catalog.currency()).write_to(&mut *out)?;

    Ok(())
}
