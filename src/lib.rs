//! `retail-etl` extracts three raw retail datasets (customers, products,
//! sales) from CSV files into in-memory [`types::Table`]s and validates each
//! table's column types against a fixed expected [`types::Schema`],
//! coercing mismatched columns best-effort.
//!
//! The pipeline never fails as a whole: unreadable sources become absent
//! datasets, unconvertible values become [`types::Value::Null`], and every
//! outcome is reported through an injected [`observability::LogSink`].
//!
//! ## Quick example
//!
//! ```no_run
//! use retail_etl::extract::{default_data_dir, extract_all};
//! use retail_etl::observability::StdErrSink;
//! use retail_etl::validate::validate_dataframes;
//!
//! let sink = StdErrSink;
//! let (customers, products, sales) = extract_all(default_data_dir(), &sink);
//! let validated = validate_dataframes(customers, products, sales, &sink);
//! for (name, table) in &validated {
//!     println!("{name}: {} rows", table.row_count());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`extract`]: CSV reading, dtype inference, and the three-dataset extractor
//! - [`validate`]: fixed schemas, dtype checking and coercion
//! - [`types`]: schema + in-memory table types
//! - [`observability`]: the injected log sink and shipped implementations
//! - [`error`]: error types used across extraction and validation

pub mod error;
pub mod extract;
pub mod observability;
pub mod types;
pub mod validate;

pub use error::{EtlError, EtlResult};
