use crate::record::{InventoryRecord, StockStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Warehouse/category selection applied to a loaded inventory. An empty
/// list selects everything, matching the dashboard's multi-select filters.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct StockFilter {
    #[serde(default)]
    pub warehouses: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl StockFilter {
    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty() && self.categories.is_empty()
    }

    pub fn matches(&self, record: &InventoryRecord) -> bool {
        (self.warehouses.is_empty() || self.warehouses.contains(&record.warehouse_id))
            && (self.categories.is_empty() || self.categories.contains(&record.product_category))
    }
}

/// KPI block shown at the top of the dashboard.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Summary {
    pub warehouse_count: usize,
    pub category_count: usize,
    pub record_count: usize,
    pub total_storage_cost: f64,
    pub understocked: usize,
    pub optimal: usize,
    pub overstocked: usize,
}

/// Recommendation figures shown below the charts.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Insights {
    pub understocked: usize,
    pub overstocked: usize,
    pub potential_savings: f64,
    /// Mean days since restock over records with a known restock date.
    pub avg_days_since_restock: Option<f64>,
}

/// Per-warehouse status counts feeding the distribution chart.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct WarehouseStatus {
    pub warehouse_id: String,
    pub understocked: usize,
    pub optimal: usize,
    pub overstocked: usize,
}

/// One point of the stock-vs-reorder scatter view.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct StockPoint {
    pub warehouse_id: String,
    pub product_category: String,
    pub current_stock_units: f64,
    pub reorder_level: f64,
    pub storage_cost: f64,
    pub status: StockStatus,
}

/// One table/export row: the raw record plus its derived columns.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RecordRow {
    pub warehouse_id: String,
    pub location: Option<String>,
    pub product_category: String,
    pub current_stock_units: f64,
    pub reorder_level: f64,
    pub max_stock_level: Option<f64>,
    pub storage_cost_per_unit: f64,
    pub last_restocked: Option<NaiveDate>,
    pub status: StockStatus,
    pub excess_stock: f64,
    pub potential_savings: f64,
    pub days_since_restock: Option<i64>,
}

/// In-memory view of one load of the inventory file. Read-only for the
/// duration of a rendering pass and discarded afterwards.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Inventory {
    pub records: Vec<InventoryRecord>,
}

impl Inventory {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Inventory { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, deduplicated warehouse identifiers. Sorted so the filter
    /// controls and charts render identically across runs.
    pub fn warehouses(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.records.iter().map(|r| &r.warehouse_id).collect();
        set.into_iter().cloned().collect()
    }

    /// Sorted, deduplicated product categories.
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.records.iter().map(|r| &r.product_category).collect();
        set.into_iter().cloned().collect()
    }

    /// View containing only the records the filter selects.
    pub fn filter(&self, filter: &StockFilter) -> Inventory {
        if filter.is_empty() {
            return self.clone();
        }
        Inventory {
            records: self
                .records
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect(),
        }
    }

    pub fn summary(&self) -> Summary {
        let mut understocked = 0;
        let mut optimal = 0;
        let mut overstocked = 0;
        let mut total_storage_cost = 0.0;

        for record in &self.records {
            match record.status() {
                StockStatus::Understocked => understocked += 1,
                StockStatus::Optimal => optimal += 1,
                StockStatus::Overstocked => overstocked += 1,
            }
            total_storage_cost += record.storage_cost();
        }

        Summary {
            warehouse_count: self.warehouses().len(),
            category_count: self.categories().len(),
            record_count: self.records.len(),
            total_storage_cost,
            understocked,
            optimal,
            overstocked,
        }
    }

    pub fn insights(&self, excess_unit_cost: f64, as_of: NaiveDate) -> Insights {
        let mut understocked = 0;
        let mut overstocked = 0;
        let mut potential_savings = 0.0;
        let mut restock_days_total = 0i64;
        let mut restock_days_count = 0usize;

        for record in &self.records {
            match record.status() {
                StockStatus::Understocked => understocked += 1,
                StockStatus::Overstocked => {
                    overstocked += 1;
                    potential_savings += record.potential_savings(excess_unit_cost);
                }
                StockStatus::Optimal => {}
            }
            if let Some(days) = record.days_since_restock(as_of) {
                restock_days_total += days;
                restock_days_count += 1;
            }
        }

        Insights {
            understocked,
            overstocked,
            potential_savings,
            avg_days_since_restock: if restock_days_count > 0 {
                Some(restock_days_total as f64 / restock_days_count as f64)
            } else {
                None
            },
        }
    }

    /// Status counts per warehouse, sorted by warehouse identifier.
    pub fn status_by_warehouse(&self) -> Vec<WarehouseStatus> {
        let mut counts: BTreeMap<&String, (usize, usize, usize)> = BTreeMap::new();
        for record in &self.records {
            let entry = counts.entry(&record.warehouse_id).or_default();
            match record.status() {
                StockStatus::Understocked => entry.0 += 1,
                StockStatus::Optimal => entry.1 += 1,
                StockStatus::Overstocked => entry.2 += 1,
            }
        }
        counts
            .into_iter()
            .map(|(warehouse_id, (understocked, optimal, overstocked))| WarehouseStatus {
                warehouse_id: warehouse_id.clone(),
                understocked,
                optimal,
                overstocked,
            })
            .collect()
    }

    /// Total storage cost per category, sorted by category name.
    pub fn cost_by_category(&self) -> Vec<(String, f64)> {
        let mut totals: BTreeMap<&String, f64> = BTreeMap::new();
        for record in &self.records {
            *totals.entry(&record.product_category).or_default() += record.storage_cost();
        }
        totals
            .into_iter()
            .map(|(category, total)| (category.clone(), total))
            .collect()
    }

    /// Mean days since restock per category, sorted by category name.
    /// Categories whose records carry no restock date report 0.
    pub fn restock_age_by_category(&self, as_of: NaiveDate) -> Vec<(String, f64)> {
        let mut ages: BTreeMap<&String, (i64, usize)> = BTreeMap::new();
        for record in &self.records {
            let entry = ages.entry(&record.product_category).or_default();
            if let Some(days) = record.days_since_restock(as_of) {
                entry.0 += days;
                entry.1 += 1;
            }
        }
        ages.into_iter()
            .map(|(category, (total, count))| {
                let mean = if count > 0 {
                    total as f64 / count as f64
                } else {
                    0.0
                };
                (category.clone(), mean)
            })
            .collect()
    }

    /// Scatter points in record order.
    pub fn stock_points(&self) -> Vec<StockPoint> {
        self.records
            .iter()
            .map(|record| StockPoint {
                warehouse_id: record.warehouse_id.clone(),
                product_category: record.product_category.clone(),
                current_stock_units: record.current_stock_units,
                reorder_level: record.reorder_level,
                storage_cost: record.storage_cost(),
                status: record.status(),
            })
            .collect()
    }

    /// Table rows with derived columns, in record order. Shared by the
    /// record table endpoint and the CSV/XLSX exports.
    pub fn rows(&self, excess_unit_cost: f64, as_of: NaiveDate) -> Vec<RecordRow> {
        self.records
            .iter()
            .map(|record| RecordRow {
                warehouse_id: record.warehouse_id.clone(),
                location: record.location.clone(),
                product_category: record.product_category.clone(),
                current_stock_units: record.current_stock_units,
                reorder_level: record.reorder_level,
                max_stock_level: record.max_stock_level,
                storage_cost_per_unit: record.storage_cost_per_unit,
                last_restocked: record.last_restocked,
                status: record.status(),
                excess_stock: record.excess_stock(),
                potential_savings: record.potential_savings(excess_unit_cost),
                days_since_restock: record.days_since_restock(as_of),
            })
            .collect()
    }
}
