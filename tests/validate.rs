use std::sync::Mutex;

use chrono::NaiveDate;

use retail_etl::observability::{LogLevel, LogSink};
use retail_etl::types::{Column, DataType, Field, Schema, Table, Value};
use retail_etl::validate::{
    CUSTOMERS_KEY, PRODUCTS_KEY, SALES_KEY, check_dtypes, customers_schema, sales_schema,
    validate_dataframes,
};

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<(LogLevel, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, level: LogLevel, message: &str) {
        self.events.lock().unwrap().push((level, message.to_string()));
    }
}

fn table_from_csv(input: &str, name: &str) -> Table {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());
    retail_etl::extract::csv::read_table_from_reader(&mut rdr, name).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn text_birth_date_column_converts_to_date() {
    let table = table_from_csv("birth_date\n1990-05-12\n1985-11-23\n", "customers");
    let schema = Schema::new(vec![Field::new("birth_date", DataType::Date)]);
    let sink = RecordingSink::default();

    let rows_before = table.row_count();
    let out = check_dtypes(table, &schema, "customers", &sink);

    let col = out.column("birth_date").unwrap();
    assert_eq!(col.data_type, DataType::Date);
    assert_eq!(out.row_count(), rows_before);
    assert_eq!(col.values, vec![date(1990, 5, 12), date(1985, 11, 23)]);

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, LogLevel::Warning);
    assert!(events[0].1.contains("birth_date"));
    assert!(events[0].1.contains("expected date"));
    assert_eq!(events[1].0, LogLevel::Info);
    assert!(events[1].1.contains("converted to date"));
}

#[test]
fn invalid_calendar_date_becomes_null() {
    let table = table_from_csv("birth_date\n2024-02-30\n2024-02-29\n", "customers");
    let schema = Schema::new(vec![Field::new("birth_date", DataType::Date)]);
    let sink = RecordingSink::default();

    let out = check_dtypes(table, &schema, "customers", &sink);

    assert_eq!(
        out.column("birth_date").unwrap().values,
        vec![Value::Null, date(2024, 2, 29)]
    );
    assert_eq!(out.row_count(), 2);
}

#[test]
fn non_numeric_cell_becomes_null_and_valid_cells_survive() {
    let table = table_from_csv("loyalty_points\n10\nN/A\n30\n", "customers");
    let schema = Schema::new(vec![Field::new("loyalty_points", DataType::Int64)]);
    let sink = RecordingSink::default();

    let out = check_dtypes(table, &schema, "customers", &sink);

    let col = out.column("loyalty_points").unwrap();
    assert_eq!(col.data_type, DataType::Int64);
    assert_eq!(
        col.values,
        vec![Value::Int64(10), Value::Null, Value::Int64(30)]
    );
}

#[test]
fn matching_column_is_left_alone_without_logging() {
    let table = table_from_csv("customer_id\n1\n2\n", "customers");
    let schema = Schema::new(vec![Field::new("customer_id", DataType::Int64)]);
    let sink = RecordingSink::default();

    let before = table.clone();
    let out = check_dtypes(table, &schema, "customers", &sink);

    assert_eq!(out, before);
    assert!(sink.events().is_empty());
}

#[test]
fn check_dtypes_is_idempotent() {
    let input = "customer_id,birth_date,loyalty_points\n1,1990-05-12,10\n2,bad-date,N/A\n";
    let schema = Schema::new(vec![
        Field::new("customer_id", DataType::Int64),
        Field::new("birth_date", DataType::Date),
        Field::new("loyalty_points", DataType::Int64),
    ]);
    let sink = RecordingSink::default();

    let once = check_dtypes(table_from_csv(input, "customers"), &schema, "customers", &sink);
    let twice = check_dtypes(once.clone(), &schema, "customers", &sink);

    assert_eq!(once, twice);
}

#[test]
fn missing_schema_column_is_reported_and_skipped() {
    let table = table_from_csv("customer_id\n1\n", "customers");
    let schema = Schema::new(vec![
        Field::new("customer_id", DataType::Int64),
        Field::new("email", DataType::Utf8),
    ]);
    let sink = RecordingSink::default();

    let before = table.clone();
    let out = check_dtypes(table, &schema, "customers", &sink);

    assert_eq!(out, before);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, LogLevel::Error);
    assert!(events[0].1.contains("Column 'email' not found in customers"));
}

#[test]
fn columns_outside_the_schema_pass_through_unchanged() {
    let input = "sale_id,surprise_column\n100,keep-me\n";
    let table = table_from_csv(input, "sales");
    let schema = Schema::new(vec![Field::new("sale_id", DataType::Int64)]);
    let sink = RecordingSink::default();

    let out = check_dtypes(table, &schema, "sales", &sink);

    assert_eq!(
        out.column("surprise_column").unwrap().values,
        vec![Value::Utf8("keep-me".to_string())]
    );
    assert!(sink.events().is_empty());
}

#[test]
fn structural_failure_leaves_column_unmodified() {
    // Ragged table: the checked column is shorter than the table's row count,
    // so the rebuilt column cannot satisfy the row-count invariant.
    let table = Table::new(
        "customers",
        vec![
            Column::new(
                "customer_id",
                DataType::Int64,
                vec![Value::Int64(1), Value::Int64(2)],
            ),
            Column::new(
                "birth_date",
                DataType::Utf8,
                vec![Value::Utf8("1990-05-12".to_string())],
            ),
        ],
    );
    let schema = Schema::new(vec![Field::new("birth_date", DataType::Date)]);
    let sink = RecordingSink::default();

    let out = check_dtypes(table, &schema, "customers", &sink);

    let col = out.column("birth_date").unwrap();
    assert_eq!(col.data_type, DataType::Utf8);
    assert_eq!(col.values, vec![Value::Utf8("1990-05-12".to_string())]);

    let events = sink.events();
    assert_eq!(events[0].0, LogLevel::Warning);
    assert_eq!(events[1].0, LogLevel::Error);
    assert!(events[1].1.contains("conversion of column 'birth_date' failed"));
}

#[test]
fn full_customers_schema_over_a_realistic_table() {
    let input = "customer_id,first_name,last_name,email,country,birth_date,gender,loyalty_points\n\
        1,Ada,Lovelace,ada@example.com,UK,1990-05-12,F,120\n\
        2,Grace,Hopper,grace@example.com,US,1985-13-40,F,N/A\n";
    let sink = RecordingSink::default();

    let out = check_dtypes(
        table_from_csv(input, "customers"),
        &customers_schema(),
        "customers",
        &sink,
    );

    assert_eq!(out.row_count(), 2);
    assert_eq!(
        out.column("birth_date").unwrap().values,
        vec![date(1990, 5, 12), Value::Null]
    );
    assert_eq!(
        out.column("loyalty_points").unwrap().values,
        vec![Value::Int64(120), Value::Null]
    );
    assert_eq!(
        out.column("first_name").unwrap().values,
        vec![
            Value::Utf8("Ada".to_string()),
            Value::Utf8("Grace".to_string())
        ]
    );
}

#[test]
fn absent_dataset_is_omitted_from_the_output_map() {
    let customers = table_from_csv("customer_id\n1\n", "customers");
    let sales = table_from_csv("sale_id\n100\n", "sales");
    let sink = RecordingSink::default();

    let validated = validate_dataframes(Some(customers), None, Some(sales), &sink);

    assert!(validated.contains_key(CUSTOMERS_KEY));
    assert!(!validated.contains_key(PRODUCTS_KEY));
    assert!(validated.contains_key(SALES_KEY));
}

#[test]
fn dataset_results_are_independent_of_missing_siblings() {
    let make_customers = || table_from_csv("customer_id,birth_date\n1,1990-05-12\n", "customers");
    let make_products =
        || table_from_csv("product_id,price\n10,49.99\n", "products");
    let make_sales = || table_from_csv("sale_id,sale_date\n100,2024-01-15\n", "sales");

    let sink = RecordingSink::default();
    let all = validate_dataframes(
        Some(make_customers()),
        Some(make_products()),
        Some(make_sales()),
        &sink,
    );
    let without_products =
        validate_dataframes(Some(make_customers()), None, Some(make_sales()), &sink);

    assert_eq!(all[CUSTOMERS_KEY], without_products[CUSTOMERS_KEY]);
    assert_eq!(all[SALES_KEY], without_products[SALES_KEY]);
}

#[test]
fn sale_date_converts_under_the_sales_schema() {
    let input = "sale_id,customer_id,product_id,quantity,sale_date,payment_method,store_location\n\
        100,1,10,2,2024-01-15,card,London\n";
    let sink = RecordingSink::default();

    let out = check_dtypes(table_from_csv(input, "sales"), &sales_schema(), "sales", &sink);

    assert_eq!(out.column("sale_date").unwrap().data_type, DataType::Date);
    assert_eq!(
        out.column("sale_date").unwrap().values,
        vec![date(2024, 1, 15)]
    );
}
