//! CSV order sink

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::PathBuf,
};

use ::csv::WriterBuilder;
use tracing::{debug, info};

use crate::sink::{OrderRow, OrderSink, SinkError};

/// Appends one row per order to a CSV file.
///
/// The header row is written when the file is first created (or found empty). The file is
/// opened in append mode for each order, so existing rows are never rewritten. A file whose
/// last line lacks a newline gets one before the new row.
#[derive(Debug, Clone)]
pub struct CsvOrderSink {
    path: PathBuf,
}

impl CsvOrderSink {
    /// Create a sink writing to `path`. The file is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvOrderSink { path: path.into() }
    }
}

/// Terminate a final line left without a newline, so the next record starts on its own line.
fn terminate_last_line(file: &mut File, len: u64) -> io::Result<()> {
    if len == 0 {
        return Ok(());
    }

    let mut last = [0_u8; 1];

    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;

    if last != *b"\n" {
        file.write_all(b"\n")?;
    }

    Ok(())
}

impl OrderSink for CsvOrderSink {
    fn append(&mut self, row: &OrderRow) -> Result<(), SinkError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let len = file.metadata()?.len();
        let write_header = len == 0;

        if write_header {
            debug!(path = %self.path.display(), "starting new orders file");
        }

        terminate_last_line(&mut file, len)?;

        let mut writer = WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        writer.serialize(row)?;
        writer.flush()?;

        info!(order_id = %row.order_id, path = %self.path.display(), "appended order");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use crate::orders::PaymentMethod;

    use super::*;

    fn row(order_id: &str, total_amount: u64) -> OrderRow {
        OrderRow {
            order_id: order_id.to_string(),
            order_datetime: "2024-03-01 10:00:00".to_string(),
            items_summary: "2 x Wings (Portion 2); 1 x Fries".to_string(),
            total_amount,
            payment_method: PaymentMethod::Upi,
        }
    }

    #[test]
    fn header_is_written_once() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");
        let mut sink = CsvOrderSink::new(&path);

        sink.append(&row("HC-20240301100000-4242", 330))?;
        sink.append(&row("HC-20240301100500-1234", 70))?;

        let contents = fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(
            lines,
            vec![
                "order_id,order_datetime,items_summary,total_amount,payment_method",
                "HC-20240301100000-4242,2024-03-01 10:00:00,2 x Wings (Portion 2); 1 x Fries,330,UPI",
                "HC-20240301100500-1234,2024-03-01 10:00:00,2 x Wings (Portion 2); 1 x Fries,70,UPI",
            ]
        );

        Ok(())
    }

    #[test]
    fn appends_to_existing_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");

        CsvOrderSink::new(&path).append(&row("HC-20240301100000-4242", 330))?;
        CsvOrderSink::new(&path).append(&row("HC-20240301100500-1234", 70))?;

        let mut reader = ::csv::Reader::from_path(&path)?;
        let rows: Vec<OrderRow> = reader.deserialize().collect::<Result<_, _>>()?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows.first().map(|r| r.total_amount), Some(330));
        assert_eq!(rows.get(1).map(|r| r.order_id.as_str()), Some("HC-20240301100500-1234"));

        Ok(())
    }

    #[test]
    fn unterminated_last_line_is_closed_before_appending() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.csv");

        fs::write(
            &path,
            "order_id,order_datetime,items_summary,total_amount,payment_method\n\
             HC-20240301090000-1000,2024-03-01 09:00:00,1 x Fries,70,Cash",
        )?;

        CsvOrderSink::new(&path).append(&row("HC-20240301100000-4242", 330))?;

        let contents = fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(
            lines,
            vec![
                "order_id,order_datetime,items_summary,total_amount,payment_method",
                "HC-20240301090000-1000,2024-03-01 09:00:00,1 x Fries,70,Cash",
                "HC-20240301100000-4242,2024-03-01 10:00:00,2 x Wings (Portion 2); 1 x Fries,330,UPI",
            ]
        );

        Ok(())
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let mut sink = CsvOrderSink::new("/nonexistent/dir/orders.csv");

        let result = sink.append(&row("HC-20240301100000-4242", 330));

        assert!(matches!(result, Err(SinkError::Io(_))));
    }
}
