use chrono::NaiveDate;
use std::io::Write;
use stockboard::loader::{LoaderError, load_inventory, normalize_header};
use tempfile::Builder;

// Helper function to write a temp CSV and load it
fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .prefix("inventory")
        .suffix(".csv")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp file");
    file
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn test_header_normalization() {
    println!("\n====== Testing header normalization ======");

    assert_eq!(normalize_header(" current stock-units "), "Current_Stock_Units");
    println!("✓ ' current stock-units ' normalizes to 'Current_Stock_Units'");

    assert_eq!(normalize_header("Storage Cost per Unit"), "Storage_Cost_Per_Unit");
    println!("✓ 'Storage Cost per Unit' normalizes to 'Storage_Cost_Per_Unit'");

    assert_eq!(normalize_header("WAREHOUSE/ID"), "Warehouse_Id");
    println!("✓ 'WAREHOUSE/ID' normalizes to 'Warehouse_Id'");

    assert_eq!(normalize_header("Reorder_Level"), "Reorder_Level");
    println!("✓ Canonical names pass through unchanged");
}

fn test_load_with_messy_headers() {
    println!("\n====== Testing CSV load with messy headers ======");

    let file = write_csv(
        " warehouse id ,Location,Product-Category,current stock units,Reorder Level,Storage Cost per Unit,Last Restocked Date\n\
         WH1,\"Mumbai, West\",Electronics,120,100,2.5,2025-06-01\n\
         WH2,Delhi,Furniture,40,80,1.0,15-05-2025\n\
         WH3,Pune,\"Say \"\"Fresh\"\" Produce\",90,40,4.0,soon\n\
         WH4,Chennai,Toys,,50,1.0,2025-06-10\n\
         WH5,Kolkata,Games,abc,50,1.0,2025-06-10\n",
    );

    let inventory = load_inventory(file.path()).expect("load should succeed");

    // Rows with missing or non-numeric stock are dropped
    assert_eq!(inventory.len(), 3);
    println!("✓ Malformed rows are dropped, 3 of 5 rows survive");

    let first = &inventory.records[0];
    assert_eq!(first.warehouse_id, "WH1");
    assert_eq!(first.location.as_deref(), Some("Mumbai, West"));
    assert_eq!(first.product_category, "Electronics");
    assert_eq!(first.current_stock_units, 120.0);
    assert_eq!(first.reorder_level, 100.0);
    assert_eq!(first.storage_cost_per_unit, 2.5);
    assert_eq!(first.last_restocked, date(2025, 6, 1));
    println!("✓ Quoted location with comma parses intact");

    let second = &inventory.records[1];
    assert_eq!(second.last_restocked, date(2025, 5, 15));
    println!("✓ Day-first date format is accepted");

    let third = &inventory.records[2];
    assert_eq!(third.product_category, "Say \"Fresh\" Produce");
    assert_eq!(third.last_restocked, None);
    println!("✓ Doubled quotes unescape and bad dates coerce to unknown");
}

fn test_max_stock_column() {
    println!("\n====== Testing explicit maximum column ======");

    let file = write_csv(
        "Warehouse_Id,Product_Category,Current_Stock_Units,Reorder_Level,Max_Stock_Level\n\
         WH1,Electronics,200,100,500\n",
    );

    let inventory = load_inventory(file.path()).expect("load should succeed");
    let record = &inventory.records[0];

    assert_eq!(record.max_stock_level, Some(500.0));
    assert_eq!(record.max_threshold(), 500.0);
    // Without the column this would be Overstocked (max 150)
    assert_eq!(record.status().as_str(), "Optimal");
    println!("✓ Max_Stock_Level overrides the multiplier rule");

    // Cost column absent: defaults to zero
    assert_eq!(record.storage_cost_per_unit, 0.0);
    println!("✓ Missing cost column defaults to zero");
}

fn test_missing_column() {
    println!("\n====== Testing missing required column ======");

    let file = write_csv(
        "Warehouse_Id,Product_Category,Current_Stock_Units\n\
         WH1,Electronics,120\n",
    );

    let err = load_inventory(file.path()).expect_err("load should fail");
    assert!(
        matches!(&err, LoaderError::MissingColumn(column) if column == "Reorder_Level"),
        "unexpected error: {}",
        err
    );
    println!("✓ Missing reorder column reported by name: {}", err);
}

fn test_empty_and_header_only() {
    println!("\n====== Testing empty and header-only files ======");

    let file = write_csv("");
    let err = load_inventory(file.path()).expect_err("load should fail");
    assert!(matches!(err, LoaderError::Empty));
    println!("✓ Empty file is rejected: {}", err);

    let file = write_csv(
        "Warehouse_Id,Product_Category,Current_Stock_Units,Reorder_Level\n",
    );
    let err = load_inventory(file.path()).expect_err("load should fail");
    assert!(matches!(err, LoaderError::NoRows));
    println!("✓ Header-only file is rejected: {}", err);
}

fn test_extension_dispatch() {
    println!("\n====== Testing extension dispatch ======");

    let mut file = Builder::new()
        .prefix("inventory")
        .suffix(".txt")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(b"Warehouse_Id\n").unwrap();
    let err = load_inventory(file.path()).expect_err("load should fail");
    assert!(matches!(&err, LoaderError::UnsupportedExtension(ext) if ext == "txt"));
    println!("✓ Unsupported extension is rejected: {}", err);

    let file = Builder::new()
        .prefix("inventory")
        .tempfile()
        .expect("failed to create temp file");
    let err = load_inventory(file.path()).expect_err("load should fail");
    assert!(matches!(err, LoaderError::MissingExtension));
    println!("✓ Extension-less path is rejected: {}", err);

    let err = load_inventory("does_not_exist.csv").expect_err("load should fail");
    assert!(matches!(err, LoaderError::Io(_)));
    println!("✓ Missing file surfaces an IO error: {}", err);
}

fn main() {
    test_header_normalization();
    test_load_with_messy_headers();
    test_max_stock_column();
    test_missing_column();
    test_empty_and_header_only();
    test_extension_dispatch();

    println!("\nAll loader tests passed!");
}
