//! Extraction of the three raw retail datasets.
//!
//! [`extract_all`] reads `customers`, `products` and `sales` from their fixed
//! file names under a data directory, in that order. Each dataset's outcome
//! is independent: a failed read is logged through the sink and yields `None`
//! for that slot, never an error to the caller.

pub mod csv;

use std::path::{Path, PathBuf};

use crate::observability::LogSink;
use crate::types::Table;

/// File name of the raw customers dataset.
pub const CUSTOMERS_FILE: &str = "customers_info.csv";
/// File name of the raw products dataset.
pub const PRODUCTS_FILE: &str = "products_info.csv";
/// File name of the raw sales dataset.
pub const SALES_FILE: &str = "sales_raw.csv";

/// Default location of the raw inputs, relative to the application root.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("data").join("raw")
}

/// Read the three raw datasets from `data_dir`, returning them positionally
/// as `(customers, products, sales)`.
///
/// Reads do not short-circuit: a missing or malformed file leaves the other
/// slots untouched.
pub fn extract_all(
    data_dir: impl AsRef<Path>,
    sink: &dyn LogSink,
) -> (Option<Table>, Option<Table>, Option<Table>) {
    let dir = data_dir.as_ref();
    let customers = read_dataset(&dir.join(CUSTOMERS_FILE), "customers", sink);
    let products = read_dataset(&dir.join(PRODUCTS_FILE), "products", sink);
    let sales = read_dataset(&dir.join(SALES_FILE), "sales", sink);
    (customers, products, sales)
}

/// Read one dataset, logging exactly one line for the outcome.
///
/// - success with rows: info line with the row count
/// - success with an empty table: warning line
/// - any read failure: error line naming the failure and path; returns `None`
pub fn read_dataset(path: &Path, name: &str, sink: &dyn LogSink) -> Option<Table> {
    match csv::read_table_from_path(path, name) {
        Ok(table) => {
            if table.row_count() == 0 {
                sink.warn(&format!(
                    "{name} at {} parsed but contains no rows",
                    path.display()
                ));
            } else {
                sink.info(&format!(
                    "Loaded {name}: {} rows from {}",
                    table.row_count(),
                    path.display()
                ));
            }
            Some(table)
        }
        Err(err) => {
            sink.error(&format!(
                "Failed to load {name} from {}: {err}",
                path.display()
            ));
            None
        }
    }
}
