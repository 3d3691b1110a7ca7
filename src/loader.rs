#![cfg(not(tarpaulin_include))]

use crate::inventory::Inventory;
use crate::record::InventoryRecord;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

lazy_static! {
    static ref HEADER_SEPARATORS: Regex = Regex::new(r"[ \-/]+").unwrap();
}

/// Errors surfaced to the user when the inventory file cannot be loaded.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read inventory file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Inventory file is empty")]
    Empty,
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No usable inventory rows in file")]
    NoRows,
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),
    #[error("File has no extension")]
    MissingExtension,
}

/// Date formats accepted for `Last_Restocked_Date`. Anything else is
/// coerced to an unknown date rather than failing the row.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Load a warehouse inventory from a CSV file
///
/// This function imports a CSV file and converts it to an Inventory. The
/// header row is normalized before columns are mapped, so files exported
/// with inconsistent header spelling (extra spaces, hyphens, mixed case)
/// load without manual cleanup.
///
/// Rows whose stock or reorder value is missing or non-numeric are dropped
/// and logged; unparseable restock dates are kept as unknown.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Returns
/// * `Result<Inventory, LoaderError>` - The loaded inventory or an error
///
/// # Examples
/// ```no_run
/// use stockboard::loader::from_csv;
///
/// match from_csv("warehouse_inventory.csv") {
///     Ok(inventory) => println!("Loaded {} records", inventory.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<Inventory, LoaderError> {
    let file = File::open(filepath)?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;

    if lines.is_empty() || lines.iter().all(|line| line.trim().is_empty()) {
        return Err(LoaderError::Empty);
    }

    let headers: Vec<String> = parse_csv_row(&lines[0])
        .iter()
        .map(|raw| normalize_header(raw))
        .collect();

    let columns = ColumnMap::detect(&headers)?;

    let mut records = Vec::new();
    for (line_no, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_csv_row(line);
        match columns.record_from_fields(&fields) {
            Some(record) => records.push(record),
            None => {
                // Row number is 1-based and counts the header line.
                log::warn!(
                    "dropping row {}: missing or non-numeric stock/reorder value",
                    line_no + 1
                );
            }
        }
    }

    if records.is_empty() {
        return Err(LoaderError::NoRows);
    }

    Ok(Inventory::new(records))
}

/// Detect file type and load the appropriate format
///
/// The dashboard reads CSV only; any other extension is reported back to
/// the user rather than guessed at.
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<Inventory, LoaderError>` - The loaded inventory or an error
pub fn load_inventory(filepath: impl AsRef<Path>) -> Result<Inventory, LoaderError> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => from_csv(path),
        Some(ext) => Err(LoaderError::UnsupportedExtension(ext.to_string())),
        None => Err(LoaderError::MissingExtension),
    }
}

/// Normalize a raw header name: trim, collapse spaces/hyphens/slashes to
/// underscores, and Title_Case each word. `" current stock-units "` becomes
/// `Current_Stock_Units`.
pub fn normalize_header(raw: &str) -> String {
    let cleaned = HEADER_SEPARATORS.replace_all(raw.trim(), "_");
    cleaned
        .split('_')
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join("_")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Indices of the recognized columns in the header row.
struct ColumnMap {
    warehouse_id: usize,
    product_category: usize,
    current_stock_units: usize,
    reorder_level: usize,
    location: Option<usize>,
    storage_cost_per_unit: Option<usize>,
    max_stock_level: Option<usize>,
    last_restocked: Option<usize>,
}

impl ColumnMap {
    /// Map normalized headers to record fields. Exact canonical names are
    /// preferred; otherwise the first header containing the fallback
    /// keywords is taken, so files whose headers only roughly match the
    /// canonical spelling still load.
    fn detect(headers: &[String]) -> Result<ColumnMap, LoaderError> {
        let required = |exact: &str, keywords: &[&str]| -> Result<usize, LoaderError> {
            find_column(headers, exact, keywords)
                .ok_or_else(|| LoaderError::MissingColumn(exact.to_string()))
        };

        Ok(ColumnMap {
            warehouse_id: required("Warehouse_Id", &["Warehouse"])?,
            product_category: required("Product_Category", &["Category"])?,
            current_stock_units: required("Current_Stock_Units", &["Stock"])?,
            reorder_level: required("Reorder_Level", &["Reorder"])?,
            location: find_column(headers, "Location", &["Location"]),
            storage_cost_per_unit: find_column(headers, "Storage_Cost_Per_Unit", &["Cost"]),
            max_stock_level: find_column(headers, "Max_Stock_Level", &["Max"]),
            last_restocked: find_column(headers, "Last_Restocked_Date", &["Restocked"]),
        })
    }

    /// Build a record from one parsed row, or None when a key numeric
    /// value is missing or malformed.
    fn record_from_fields(&self, fields: &[String]) -> Option<InventoryRecord> {
        let field = |idx: usize| fields.get(idx).map(|s| s.trim()).unwrap_or("");

        let current_stock_units: f64 = field(self.current_stock_units).parse().ok()?;
        let reorder_level: f64 = field(self.reorder_level).parse().ok()?;

        let optional_text = |idx: Option<usize>| {
            idx.map(field)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let optional_number = |idx: Option<usize>| idx.and_then(|i| field(i).parse::<f64>().ok());

        Some(InventoryRecord {
            warehouse_id: field(self.warehouse_id).to_string(),
            location: optional_text(self.location),
            product_category: field(self.product_category).to_string(),
            current_stock_units,
            reorder_level,
            max_stock_level: optional_number(self.max_stock_level),
            storage_cost_per_unit: optional_number(self.storage_cost_per_unit).unwrap_or(0.0),
            last_restocked: self.last_restocked.and_then(|i| parse_date(field(i))),
        })
    }
}

/// Locate a header by canonical name, falling back to the first header
/// containing every keyword.
fn find_column(headers: &[String], exact: &str, keywords: &[&str]) -> Option<usize> {
    if let Some(idx) = headers.iter().position(|h| h == exact) {
        return Some(idx);
    }
    headers
        .iter()
        .position(|h| keywords.iter().all(|kw| h.contains(kw)))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

// Parse a CSV row into a vector of strings
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if let Some(&next) = chars.peek() {
                    if next == '"' && in_quotes {
                        // Double quote inside quoted field - add a single quote
                        current_field.push('"');
                        chars.next();
                    } else {
                        // Toggle quote state
                        in_quotes = !in_quotes;
                    }
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                // End of field
                result.push(current_field);
                current_field = String::new();
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    // Add the last field
    result.push(current_field);

    result
}
