// src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

/// Fatal configuration problems. Reported before any computation starts;
/// no partial output is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A holding cost of zero would make the EOQ formula divide by zero.
    #[error("holding cost must be positive, got {0}")]
    NonPositiveHoldingCost(f64),

    #[error("ordering cost must be positive, got {0}")]
    NonPositiveOrderingCost(f64),

    #[error("lead time must be at least one day, got {0}")]
    NonPositiveLeadTime(u32),

    #[error("rolling window must cover at least one observation")]
    EmptyWindow,

    /// The A/B class boundaries must be strictly increasing.
    #[error("variability thresholds must satisfy {low} < {high}")]
    ThresholdOrder { low: f64, high: f64 },
}

/// A row that violates the input contract. The partition containing the row
/// is flagged invalid and excluded from the run; other partitions proceed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("negative sales quantity {quantity} for {location_id}/{item_id} on {date}")]
    NegativeSales {
        location_id: String,
        item_id: String,
        date: NaiveDate,
        quantity: i64,
    },

    #[error("negative inventory level {level} for {location_id}/{item_id} on {date}")]
    NegativeInventory {
        location_id: String,
        item_id: String,
        date: NaiveDate,
        level: i64,
    },
}
