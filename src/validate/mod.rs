//! Dtype validation of the extracted datasets.
//!
//! [`validate_dataframes`] holds the fixed expected schema for each of the
//! three datasets and applies [`check_dtypes`] to every table that was
//! successfully extracted. Datasets that failed extraction are simply absent
//! from the output map; their failure was already logged by the extractor.

pub mod dtypes;

pub use dtypes::check_dtypes;

use std::collections::HashMap;

use crate::observability::LogSink;
use crate::types::{DataType, Field, Schema, Table};

/// Output key for the validated customers table.
pub const CUSTOMERS_KEY: &str = "customers_df";
/// Output key for the validated products table.
pub const PRODUCTS_KEY: &str = "products_df";
/// Output key for the validated sales table.
pub const SALES_KEY: &str = "sales_df";

/// Expected column types of the customers dataset.
pub fn customers_schema() -> Schema {
    Schema::new(vec![
        Field::new("customer_id", DataType::Int64),
        Field::new("first_name", DataType::Utf8),
        Field::new("last_name", DataType::Utf8),
        Field::new("email", DataType::Utf8),
        Field::new("country", DataType::Utf8),
        Field::new("birth_date", DataType::Date),
        Field::new("gender", DataType::Utf8),
        Field::new("loyalty_points", DataType::Int64),
    ])
}

/// Expected column types of the products dataset.
pub fn products_schema() -> Schema {
    Schema::new(vec![
        Field::new("product_id", DataType::Int64),
        Field::new("product_name", DataType::Utf8),
        Field::new("category", DataType::Utf8),
        Field::new("price", DataType::Float64),
        Field::new("stock_quantity", DataType::Int64),
        Field::new("supplier", DataType::Utf8),
    ])
}

/// Expected column types of the sales dataset.
pub fn sales_schema() -> Schema {
    Schema::new(vec![
        Field::new("sale_id", DataType::Int64),
        Field::new("customer_id", DataType::Int64),
        Field::new("product_id", DataType::Int64),
        Field::new("quantity", DataType::Int64),
        Field::new("sale_date", DataType::Date),
        Field::new("payment_method", DataType::Utf8),
        Field::new("store_location", DataType::Utf8),
    ])
}

/// Validate whichever of the three datasets are present, returning a map of
/// validated tables keyed `customers_df` / `products_df` / `sales_df`.
///
/// `None` inputs are omitted from the map, not treated as errors.
pub fn validate_dataframes(
    customers: Option<Table>,
    products: Option<Table>,
    sales: Option<Table>,
    sink: &dyn LogSink,
) -> HashMap<String, Table> {
    let mut validated = HashMap::new();

    if let Some(table) = customers {
        validated.insert(
            CUSTOMERS_KEY.to_string(),
            check_dtypes(table, &customers_schema(), "customers", sink),
        );
    }
    if let Some(table) = products {
        validated.insert(
            PRODUCTS_KEY.to_string(),
            check_dtypes(table, &products_schema(), "products", sink),
        );
    }
    if let Some(table) = sales {
        validated.insert(
            SALES_KEY.to_string(),
            check_dtypes(table, &sales_schema(), "sales", sink),
        );
    }

    validated
}
