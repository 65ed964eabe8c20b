// src/model/observation.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::IntegrityError;

/// Demand variability classes, from steady (A) to volatile (C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCategory {
    A,
    B,
    C,
}

/// One input row exactly as read from CSV or produced by the generator.
/// Quantities are signed here so that out-of-contract input can be detected
/// and rejected instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub location_id: String,
    pub item_id: String,
    pub sales_quantity: i64,
    pub inventory_level: i64,
}

impl RawObservation {
    /// Enforces the non-negativity contract on both quantities.
    pub fn validate(self) -> Result<InventoryObservation, IntegrityError> {
        if self.sales_quantity < 0 {
            return Err(IntegrityError::NegativeSales {
                location_id: self.location_id,
                item_id: self.item_id,
                date: self.date,
                quantity: self.sales_quantity,
            });
        }
        if self.inventory_level < 0 {
            return Err(IntegrityError::NegativeInventory {
                location_id: self.location_id,
                item_id: self.item_id,
                date: self.date,
                level: self.inventory_level,
            });
        }
        Ok(InventoryObservation {
            date: self.date,
            location_id: self.location_id,
            item_id: self.item_id,
            sales_quantity: self.sales_quantity as u32,
            inventory_level: self.inventory_level as u32,
        })
    }
}

/// One validated observation per (location, item, date). Immutable raw input;
/// every derived signal is computed from these, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryObservation {
    pub date: NaiveDate,
    pub location_id: String,
    pub item_id: String,
    pub sales_quantity: u32,
    pub inventory_level: u32,
}

/// An observation plus every replenishment signal derived from its partition.
///
/// `None` marks a statistic that is undefined for the partition (zero mean
/// sales for the CV, a single observation for the sample deviation, zero
/// average inventory for turnover) and everything downstream of it. Missing
/// values are never coerced to zero or infinity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedObservation {
    pub date: NaiveDate,
    pub location_id: String,
    pub item_id: String,
    pub sales_quantity: u32,
    pub inventory_level: u32,
    pub demand_forecast: f64,
    pub coefficient_of_variation: Option<f64>,
    pub inventory_category: Option<InventoryCategory>,
    pub safety_stock: Option<f64>,
    pub eoq: f64,
    pub reorder_point: Option<f64>,
    pub should_reorder: Option<bool>,
    pub order_quantity: Option<f64>,
    pub total_sales: u64,
    pub average_inventory_level: f64,
    pub inventory_turnover: Option<f64>,
}

/// Turnover aggregated across every item and date at one location. Computed
/// over the full set of rows at the location, not from per-item ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationTurnover {
    pub location_id: String,
    pub total_sales: u64,
    pub average_inventory_level: f64,
    pub inventory_turnover: Option<f64>,
}
