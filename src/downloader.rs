#![cfg(not(tarpaulin_include))]
#![cfg(feature = "web")]

use crate::inventory::RecordRow;
use std::error::Error;

/// Column order shared by the CSV and XLSX exports. Raw columns first,
/// derived columns after, matching the dashboard table.
const EXPORT_HEADERS: [&str; 12] = [
    "Warehouse_Id",
    "Location",
    "Product_Category",
    "Current_Stock_Units",
    "Reorder_Level",
    "Max_Stock_Level",
    "Storage_Cost_Per_Unit",
    "Last_Restocked_Date",
    "Status",
    "Excess_Stock",
    "Potential_Savings",
    "Days_Since_Restock",
];

/// Convert the filtered view to CSV format
///
/// This function exports table rows to CSV (Comma-Separated Values)
/// format, the payload behind the dashboard's download button. Special
/// characters (commas, quotes, newlines) are properly escaped, optional
/// values render as empty fields, and dates use ISO `YYYY-MM-DD`.
///
/// # Arguments
/// * `rows` - Table rows (records plus derived columns) to export
///
/// # Returns
/// * `Result<String, Box<dyn Error>>` - CSV content as a string or an error
pub fn to_csv(rows: &[RecordRow]) -> Result<String, Box<dyn Error>> {
    let mut csv_content = String::new();

    csv_content.push_str(&EXPORT_HEADERS.join(","));
    csv_content.push('\n');

    for row in rows {
        let fields = [
            row.warehouse_id.clone(),
            row.location.clone().unwrap_or_default(),
            row.product_category.clone(),
            row.current_stock_units.to_string(),
            row.reorder_level.to_string(),
            row.max_stock_level.map(|v| v.to_string()).unwrap_or_default(),
            row.storage_cost_per_unit.to_string(),
            row.last_restocked
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            row.status.as_str().to_string(),
            row.excess_stock.to_string(),
            row.potential_savings.to_string(),
            row.days_since_restock
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ];

        for (c, value) in fields.iter().enumerate() {
            if c > 0 {
                csv_content.push(',');
            }
            csv_content.push_str(&escape_csv_field(value));
        }
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Convert the filtered view to XLSX format
///
/// This function exports table rows to XLSX (Excel) format using the
/// rust_xlsxwriter library, preserving numbers as numbers so the result is
/// usable for follow-up analysis.
///
/// # Arguments
/// * `rows` - Table rows (records plus derived columns) to export
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - XLSX file content as bytes or an error
pub fn to_xlsx(rows: &[RecordRow]) -> Result<Vec<u8>, Box<dyn Error>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    for (c, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, c as u16, *header)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        worksheet.write_string(r, 0, row.warehouse_id.as_str())?;
        worksheet.write_string(r, 1, row.location.as_deref().unwrap_or(""))?;
        worksheet.write_string(r, 2, row.product_category.as_str())?;
        worksheet.write_number(r, 3, row.current_stock_units)?;
        worksheet.write_number(r, 4, row.reorder_level)?;
        if let Some(max) = row.max_stock_level {
            worksheet.write_number(r, 5, max)?;
        }
        worksheet.write_number(r, 6, row.storage_cost_per_unit)?;
        if let Some(date) = row.last_restocked {
            worksheet.write_string(r, 7, date.format("%Y-%m-%d").to_string())?;
        }
        worksheet.write_string(r, 8, row.status.as_str())?;
        worksheet.write_number(r, 9, row.excess_stock)?;
        worksheet.write_number(r, 10, row.potential_savings)?;
        if let Some(days) = row.days_since_restock {
            worksheet.write_number(r, 11, days as f64)?;
        }
    }

    workbook.push_worksheet(worksheet);

    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

// Escape a field value - commas, quotes, newlines need quoting
fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}
