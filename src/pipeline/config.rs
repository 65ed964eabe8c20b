// src/pipeline/config.rs

use crate::error::ConfigError;

/// Selects the statistical basis for safety stock and the reorder point.
/// The two formulas are distinct conventions and are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplenishmentFormula {
    /// Safety stock from the partition's own sales deviation; reorder point
    /// adds the partition's mean on-hand inventory.
    PartitionVariability,
    /// Safety stock from the forecast deviation across the full dataset,
    /// scaled by the square root of the lead time; reorder point adds the
    /// row's EOQ spread over the lead time.
    LeadTimeDemand,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Trailing window length, in observations, for the rolling mean forecast.
    pub window_size: usize,
    /// Inclusive upper CV bound for class A.
    pub class_a_max: f64,
    /// Inclusive upper CV bound for class B; anything above is class C.
    pub class_b_max: f64,
    /// Service-level z-score for the safety stock buffer.
    pub service_level_z: f64,
    /// Fixed cost of placing one order.
    pub ordering_cost: f64,
    /// Cost of holding one unit in inventory.
    pub holding_cost: f64,
    pub lead_time_days: u32,
    pub formula: ReplenishmentFormula,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: 7,
            class_a_max: 0.1,
            class_b_max: 0.3,
            service_level_z: 1.96,
            ordering_cost: 100.0,
            holding_cost: 5.0,
            lead_time_days: 7,
            formula: ReplenishmentFormula::PartitionVariability,
        }
    }
}

impl PipelineConfig {
    /// Checked before any computation starts; a bad configuration fails the
    /// whole run rather than producing partial output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.holding_cost <= 0.0 {
            return Err(ConfigError::NonPositiveHoldingCost(self.holding_cost));
        }
        if self.ordering_cost <= 0.0 {
            return Err(ConfigError::NonPositiveOrderingCost(self.ordering_cost));
        }
        if self.lead_time_days == 0 {
            return Err(ConfigError::NonPositiveLeadTime(self.lead_time_days));
        }
        if self.window_size == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.class_a_max >= self.class_b_max {
            return Err(ConfigError::ThresholdOrder {
                low: self.class_a_max,
                high: self.class_b_max,
            });
        }
        Ok(())
    }
}
