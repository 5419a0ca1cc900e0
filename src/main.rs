//! Runs extraction and validation over the fixed `data/raw` layout, logging
//! to `etl.log` and stderr.

use std::sync::Arc;

use retail_etl::extract::{default_data_dir, extract_all};
use retail_etl::observability::{CompositeSink, FileSink, StdErrSink};
use retail_etl::validate::validate_dataframes;

fn main() {
    let sink = CompositeSink::new(vec![
        Arc::new(FileSink::new("etl.log")),
        Arc::new(StdErrSink),
    ]);

    let (customers, products, sales) = extract_all(default_data_dir(), &sink);
    let validated = validate_dataframes(customers, products, sales, &sink);

    let mut keys: Vec<&str> = validated.keys().map(String::as_str).collect();
    keys.sort_unstable();
    for key in keys {
        let table = &validated[key];
        println!(
            "{key}: {} rows x {} columns",
            table.row_count(),
            table.columns.len()
        );
    }
}
