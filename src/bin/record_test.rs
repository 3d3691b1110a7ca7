use chrono::NaiveDate;
use stockboard::record::{
    DEFAULT_EXCESS_UNIT_COST, InventoryRecord, OVERSTOCK_MULTIPLIER, StockStatus,
};

// Helper function to build a record with the given stock and reorder level
fn record(stock: f64, reorder: f64) -> InventoryRecord {
    InventoryRecord {
        warehouse_id: "WH1".to_string(),
        location: None,
        product_category: "Electronics".to_string(),
        current_stock_units: stock,
        reorder_level: reorder,
        max_stock_level: None,
        storage_cost_per_unit: 2.0,
        last_restocked: None,
    }
}

// Helper function to check classification
fn assert_status(record: &InventoryRecord, expected: StockStatus) {
    assert_eq!(record.status(), expected);
    println!(
        "✓ stock={} reorder={} max={} classified as {}",
        record.current_stock_units,
        record.reorder_level,
        record.max_threshold(),
        record.status().as_str()
    );
}

// Test classification around the reorder and maximum thresholds
fn test_status_classification() {
    println!("\n====== Testing status classification ======");

    assert_status(&record(99.0, 100.0), StockStatus::Understocked);
    assert_status(&record(0.0, 100.0), StockStatus::Understocked);

    // Stock exactly at the reorder level is Optimal
    assert_status(&record(100.0, 100.0), StockStatus::Optimal);
    assert_status(&record(149.0, 100.0), StockStatus::Optimal);

    // The default maximum is 1.5x the reorder level; stock at the maximum
    // is Overstocked
    assert_eq!(OVERSTOCK_MULTIPLIER, 1.5);
    assert_status(&record(150.0, 100.0), StockStatus::Overstocked);
    assert_status(&record(400.0, 100.0), StockStatus::Overstocked);
}

// Test that an explicit maximum overrides the multiplier rule
fn test_explicit_max_threshold() {
    println!("\n====== Testing explicit maximum threshold ======");

    let mut rec = record(150.0, 50.0);
    rec.max_stock_level = Some(200.0);

    assert_eq!(rec.max_threshold(), 200.0);
    // 150 would be Overstocked under the 1.5x rule (max 75)
    assert_status(&rec, StockStatus::Optimal);

    rec.current_stock_units = 200.0;
    assert_status(&rec, StockStatus::Overstocked);

    rec.current_stock_units = 49.0;
    assert_status(&rec, StockStatus::Understocked);
}

// Test the derived excess/savings/cost quantities
fn test_derived_quantities() {
    println!("\n====== Testing derived quantities ======");

    let rec = record(130.0, 100.0);
    assert_eq!(rec.excess_stock(), 30.0);
    assert_eq!(rec.potential_savings(DEFAULT_EXCESS_UNIT_COST), 300.0);
    println!("✓ Excess of 30 units yields savings of 300 at the default rate");

    let rec = record(80.0, 100.0);
    assert_eq!(rec.excess_stock(), 0.0);
    assert_eq!(rec.potential_savings(DEFAULT_EXCESS_UNIT_COST), 0.0);
    println!("✓ Stock below the reorder level has zero excess and savings");

    let mut rec = record(40.0, 10.0);
    rec.storage_cost_per_unit = 2.5;
    assert_eq!(rec.storage_cost(), 100.0);
    println!("✓ Storage cost is stock times per-unit cost");
}

// Test day arithmetic against a pinned date
fn test_days_since_restock() {
    println!("\n====== Testing days since restock ======");

    let as_of = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    let mut rec = record(100.0, 100.0);
    assert_eq!(rec.days_since_restock(as_of), None);
    println!("✓ Unknown restock date yields None");

    rec.last_restocked = NaiveDate::from_ymd_opt(2025, 6, 1);
    assert_eq!(rec.days_since_restock(as_of), Some(30));
    println!("✓ 2025-06-01 to 2025-07-01 is 30 days");

    rec.last_restocked = Some(as_of);
    assert_eq!(rec.days_since_restock(as_of), Some(0));
    println!("✓ Restocked today yields 0 days");
}

fn main() {
    test_status_classification();
    test_explicit_max_threshold();
    test_derived_quantities();
    test_days_since_restock();

    println!("\nAll record tests passed!");
}
