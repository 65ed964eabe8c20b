// src/pipeline/stages.rs

//! The fixed-formula pipeline stages. Each is a pure function of values
//! computed earlier in the chain; undefined inputs propagate as `None`.

/// Safety stock from the partition's own sales variability:
/// `z * std(sales over partition)`. Constant within a partition.
pub fn variability_safety_stock(z: f64, sales_std: Option<f64>) -> Option<f64> {
    sales_std.map(|std| z * std)
}

/// Lead-time-adjusted safety stock:
/// `z * sqrt(lead_time_days) * std(demand forecast over the full dataset)`.
/// The deviation is taken over the forecast series of the whole run, not the
/// partition's raw sales; the two bases are deliberately different.
pub fn lead_time_safety_stock(
    z: f64,
    lead_time_days: u32,
    forecast_std: Option<f64>,
) -> Option<f64> {
    forecast_std.map(|std| z * (lead_time_days as f64).sqrt() * std)
}

/// Economic order quantity: `sqrt(2 * D * ordering_cost / holding_cost)`
/// with D the row's demand forecast. Varies per row with the forecast.
pub fn economic_order_quantity(demand_forecast: f64, ordering_cost: f64, holding_cost: f64) -> f64 {
    ((2.0 * demand_forecast * ordering_cost) / holding_cost).sqrt()
}

/// Reorder point as safety stock plus the partition's mean on-hand inventory.
pub fn inventory_mean_reorder_point(
    safety_stock: Option<f64>,
    mean_inventory_level: f64,
) -> Option<f64> {
    safety_stock.map(|stock| stock + mean_inventory_level)
}

/// Reorder point as safety stock plus the row's EOQ spread over the lead time.
pub fn lead_time_reorder_point(
    safety_stock: Option<f64>,
    eoq: f64,
    lead_time_days: u32,
) -> Option<f64> {
    safety_stock.map(|stock| stock + eoq / lead_time_days as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderDecision {
    pub should_reorder: bool,
    /// Exactly zero whenever `should_reorder` is false.
    pub order_quantity: f64,
}

/// Stateless reorder decision. Strict comparison: stock sitting exactly at
/// the reorder point does not trigger a reorder.
pub fn reorder_decision(inventory_level: u32, reorder_point: f64) -> ReorderDecision {
    let level = inventory_level as f64;
    if level < reorder_point {
        ReorderDecision {
            should_reorder: true,
            order_quantity: (reorder_point - level).max(0.0),
        }
    } else {
        ReorderDecision {
            should_reorder: false,
            order_quantity: 0.0,
        }
    }
}

/// Sales volume over average inventory held. `None` when nothing was held.
pub fn turnover_ratio(total_sales: u64, average_inventory_level: f64) -> Option<f64> {
    if average_inventory_level == 0.0 {
        return None;
    }
    Some(total_sales as f64 / average_inventory_level)
}
