// src/strategy/traits.rs

use std::fmt::Debug;

use chrono::NaiveDate;

use crate::model::observation::{InventoryCategory, InventoryObservation};

/// Feature view of one observation, handed to externally trained models.
#[derive(Debug, Clone)]
pub struct ObservationFeatures<'a> {
    pub date: NaiveDate,
    pub location_id: &'a str,
    pub item_id: &'a str,
    pub inventory_level: u32,
    /// Populated once the forecasting stage has run; `None` while the
    /// forecast itself is being computed.
    pub demand_forecast: Option<f64>,
}

/// Demand prediction contract of an externally trained regression model.
/// Training, feature encoding and model evaluation all happen outside this
/// crate; the pipeline only consumes predictions.
pub trait DemandModel: Debug + Send + Sync {
    fn predict(&self, features: &ObservationFeatures<'_>) -> f64;
}

/// Category prediction contract of an externally trained categorizer
/// (e.g. a clustering model over forecast and inventory features).
pub trait CategoryModel: Debug + Send + Sync {
    fn predict(&self, features: &ObservationFeatures<'_>) -> InventoryCategory;
}

/// Demand variability summary assigned to an observation by a classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariabilityProfile {
    /// `None` when the partition's mean sales is zero or the deviation is
    /// undefined (single observation).
    pub coefficient_of_variation: Option<f64>,
    /// Undefined exactly when the coefficient of variation is, unless the
    /// category comes from an external model.
    pub category: Option<InventoryCategory>,
}

/// Produces one demand forecast per observation of a partition.
///
/// `Send` + `Sync` so partitions can be enriched in parallel.
pub trait DemandForecaster: Debug + Send + Sync {
    /// `partition` is ordered by date ascending; the result aligns 1:1.
    fn forecast(&self, partition: &[&InventoryObservation]) -> Vec<f64>;
}

/// Assigns a variability profile to every observation of a partition.
pub trait InventoryClassifier: Debug + Send + Sync {
    /// `forecasts` aligns 1:1 with `partition`; forecasting runs first.
    fn classify(
        &self,
        partition: &[&InventoryObservation],
        forecasts: &[f64],
    ) -> Vec<VariabilityProfile>;
}
