//! Batch inventory replenishment analytics.
//!
//! Takes a daily time series of sales and stock-on-hand observations, one row
//! per (location, item, date), and computes per-row replenishment signals:
//! a smoothed demand forecast, a variability class, a safety stock buffer, an
//! economic order quantity, a reorder point and decision, and turnover ratios
//! at item and location granularity. All derived values are pure functions of
//! the row's own (location, item) partition, so partitions are enriched
//! independently and in parallel.

pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod strategy;
