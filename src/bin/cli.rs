#![cfg(not(tarpaulin_include))]

use std::env;
use std::process;

use stockboard::inventory::StockFilter;
use stockboard::loader::load_inventory;
use stockboard::record::DEFAULT_EXCESS_UNIT_COST;

fn usage(program: &str) {
    eprintln!(
        "Usage: {} [inventory.csv] [--warehouse W1,W2] [--category C1,C2]",
        program
    );
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Terminal front end: prints the dashboard's summary and insights for a
/// single load, without the web stack.
fn main() {
    let args: Vec<String> = env::args().collect();

    let mut csv_path = "warehouse_inventory.csv".to_string();
    let mut filter = StockFilter::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--warehouse" if i + 1 < args.len() => {
                filter.warehouses = split_list(&args[i + 1]);
                i += 2;
            }
            "--category" if i + 1 < args.len() => {
                filter.categories = split_list(&args[i + 1]);
                i += 2;
            }
            "--help" | "-h" => {
                usage(&args[0]);
                return;
            }
            arg if !arg.starts_with("--") => {
                csv_path = arg.to_string();
                i += 1;
            }
            _ => {
                usage(&args[0]);
                process::exit(1);
            }
        }
    }

    let inventory = match load_inventory(&csv_path) {
        Ok(inventory) => inventory,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let view = inventory.filter(&filter);
    let as_of = chrono::Local::now().date_naive();
    let summary = view.summary();
    let insights = view.insights(DEFAULT_EXCESS_UNIT_COST, as_of);

    println!("Warehouse inventory report: {}", csv_path);
    println!(
        "Warehouses: {}  Categories: {}  Records: {}",
        summary.warehouse_count, summary.category_count, summary.record_count
    );
    println!("Total storage cost: {:.2}", summary.total_storage_cost);
    println!(
        "Status: {} understocked, {} optimal, {} overstocked",
        summary.understocked, summary.optimal, summary.overstocked
    );

    println!();
    println!("Per warehouse:");
    for warehouse in view.status_by_warehouse() {
        println!(
            "  {}: {} understocked, {} optimal, {} overstocked",
            warehouse.warehouse_id,
            warehouse.understocked,
            warehouse.optimal,
            warehouse.overstocked
        );
    }

    println!();
    println!("Insights:");
    println!(
        "  Understocked products: {} - restock to avoid shortages",
        insights.understocked
    );
    println!(
        "  Overstocked products: {} - possible savings of {:.2}",
        insights.overstocked, insights.potential_savings
    );
    match insights.avg_days_since_restock {
        Some(days) => println!("  Average days since restock: {:.1} days", days),
        None => println!("  Average days since restock: unknown"),
    }
}
