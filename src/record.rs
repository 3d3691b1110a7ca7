use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Multiplier applied to the reorder level to derive the maximum stock
/// threshold when the file carries no explicit `Max_Stock_Level` column.
pub const OVERSTOCK_MULTIPLIER: f64 = 1.5;

/// Carrying cost per excess unit used for potential-savings estimates
/// unless overridden at launch.
pub const DEFAULT_EXCESS_UNIT_COST: f64 = 10.0;

/// One row of the warehouse inventory file.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct InventoryRecord {
    pub warehouse_id: String,
    pub location: Option<String>,
    pub product_category: String,
    pub current_stock_units: f64,
    pub reorder_level: f64,
    pub max_stock_level: Option<f64>,
    pub storage_cost_per_unit: f64,
    pub last_restocked: Option<NaiveDate>,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum StockStatus {
    Understocked,
    Optimal,
    Overstocked,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Understocked => "Understocked",
            StockStatus::Optimal => "Optimal",
            StockStatus::Overstocked => "Overstocked",
        }
    }
}

impl InventoryRecord {
    /// Maximum threshold for this record. Falls back to the multiplier rule
    /// when the file has no explicit maximum column.
    pub fn max_threshold(&self) -> f64 {
        self.max_stock_level
            .unwrap_or(OVERSTOCK_MULTIPLIER * self.reorder_level)
    }

    /// Classify the record. Stock exactly at the reorder level counts as
    /// Optimal; stock at or above the maximum threshold counts as
    /// Overstocked.
    pub fn status(&self) -> StockStatus {
        if self.current_stock_units < self.reorder_level {
            StockStatus::Understocked
        } else if self.current_stock_units < self.max_threshold() {
            StockStatus::Optimal
        } else {
            StockStatus::Overstocked
        }
    }

    /// Units held above the reorder level, floored at zero.
    pub fn excess_stock(&self) -> f64 {
        (self.current_stock_units - self.reorder_level).max(0.0)
    }

    /// Estimated savings from shedding the excess units at the given
    /// per-unit carrying cost.
    pub fn potential_savings(&self, excess_unit_cost: f64) -> f64 {
        self.excess_stock() * excess_unit_cost
    }

    /// Cost of holding the current stock.
    pub fn storage_cost(&self) -> f64 {
        self.current_stock_units * self.storage_cost_per_unit
    }

    /// Whole days between the last restock and `as_of`. None when the
    /// restock date is unknown.
    pub fn days_since_restock(&self, as_of: NaiveDate) -> Option<i64> {
        self.last_restocked.map(|date| (as_of - date).num_days())
    }
}
