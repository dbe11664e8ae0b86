//! Hot Chick
//!
//! Order cart and checkout for a single-counter food menu: build priced line items from a
//! menu, collect them in a per-session cart, and turn the cart into an order appended to a
//! tabular store.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod items;
pub mod logging;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod receipt;
pub mod session;
pub mod sink;
