//! In-memory order sink

use tracing::debug;

use crate::sink::{OrderRow, OrderSink, SinkError};

/// Keeps appended rows in memory. Used for dry runs.
#[derive(Debug, Default)]
pub struct MemoryOrderSink {
    rows: Vec<OrderRow>,
}

impl MemoryOrderSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows appended so far, oldest first.
    pub fn rows(&self) -> &[OrderRow] {
        &self.rows
    }
}

impl OrderSink for MemoryOrderSink {
    fn append(&mut self, row: &OrderRow) -> Result<(), SinkError> {
        debug!(order_id = %row.order_id, "kept order in memory");

        self.rows.push(row.clone());

        Ok(())
    }
}
