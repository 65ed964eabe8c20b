// src/strategy/implementations.rs

use crate::model::observation::{InventoryCategory, InventoryObservation};
use crate::pipeline::statistics;
use crate::strategy::traits::{
    CategoryModel, DemandForecaster, DemandModel, InventoryClassifier, ObservationFeatures,
    VariabilityProfile,
};

// =========================================================================
// 1. Rolling Mean Forecaster (default)
// =========================================================================

/// Trailing windowed mean over the partition's sales.
///
/// The i-th forecast averages the last `min(window, i + 1)` sales values, so
/// the first `window - 1` positions use a partial (shrinking) window and the
/// window is never empty. A single-row partition forecasts its own sales.
#[derive(Debug, Clone)]
pub struct RollingMeanForecaster {
    window: usize,
}

impl RollingMeanForecaster {
    /// `window` must be at least 1; the pipeline validates this up front.
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl DemandForecaster for RollingMeanForecaster {
    fn forecast(&self, partition: &[&InventoryObservation]) -> Vec<f64> {
        let mut forecasts = Vec::with_capacity(partition.len());
        for i in 0..partition.len() {
            let start = (i + 1).saturating_sub(self.window);
            let window = &partition[start..=i];
            let sum: u64 = window.iter().map(|obs| obs.sales_quantity as u64).sum();
            forecasts.push(sum as f64 / window.len() as f64);
        }
        forecasts
    }
}

// =========================================================================
// 2. Coefficient-of-Variation Classifier (default)
// =========================================================================

/// Bins partitions into A/B/C by the coefficient of variation of their sales.
///
/// Right-inclusive boundaries: A up to and including `class_a_max`, B up to
/// and including `class_b_max`, C above. Every row of a partition carries the
/// same profile; it is undefined when the CV is.
#[derive(Debug, Clone)]
pub struct CoefficientOfVariationClassifier {
    class_a_max: f64,
    class_b_max: f64,
}

impl CoefficientOfVariationClassifier {
    pub fn new(class_a_max: f64, class_b_max: f64) -> Self {
        Self {
            class_a_max,
            class_b_max,
        }
    }

    fn category_for(&self, cv: f64) -> InventoryCategory {
        if cv <= self.class_a_max {
            InventoryCategory::A
        } else if cv <= self.class_b_max {
            InventoryCategory::B
        } else {
            InventoryCategory::C
        }
    }
}

impl InventoryClassifier for CoefficientOfVariationClassifier {
    fn classify(
        &self,
        partition: &[&InventoryObservation],
        _forecasts: &[f64],
    ) -> Vec<VariabilityProfile> {
        let sales: Vec<f64> = partition
            .iter()
            .map(|obs| obs.sales_quantity as f64)
            .collect();
        let cv = statistics::coefficient_of_variation(&sales);
        let profile = VariabilityProfile {
            coefficient_of_variation: cv,
            category: cv.map(|value| self.category_for(value)),
        };
        vec![profile; partition.len()]
    }
}

// =========================================================================
// 3. Model-backed adapters
// =========================================================================

/// Adapts an externally trained demand model to the forecaster seam.
/// The model sees one feature vector per row; no windowing is involved.
#[derive(Debug)]
pub struct ModelForecaster {
    model: Box<dyn DemandModel>,
}

impl ModelForecaster {
    pub fn new(model: Box<dyn DemandModel>) -> Self {
        Self { model }
    }
}

impl DemandForecaster for ModelForecaster {
    fn forecast(&self, partition: &[&InventoryObservation]) -> Vec<f64> {
        partition
            .iter()
            .map(|obs| {
                self.model.predict(&ObservationFeatures {
                    date: obs.date,
                    location_id: &obs.location_id,
                    item_id: &obs.item_id,
                    inventory_level: obs.inventory_level,
                    demand_forecast: None,
                })
            })
            .collect()
    }
}

/// Adapts an externally trained categorizer to the classifier seam. Rows of
/// one partition may land in different categories, and no coefficient of
/// variation is produced.
#[derive(Debug)]
pub struct ModelClassifier {
    model: Box<dyn CategoryModel>,
}

impl ModelClassifier {
    pub fn new(model: Box<dyn CategoryModel>) -> Self {
        Self { model }
    }
}

impl InventoryClassifier for ModelClassifier {
    fn classify(
        &self,
        partition: &[&InventoryObservation],
        forecasts: &[f64],
    ) -> Vec<VariabilityProfile> {
        partition
            .iter()
            .zip(forecasts)
            .map(|(obs, &forecast)| VariabilityProfile {
                coefficient_of_variation: None,
                category: Some(self.model.predict(&ObservationFeatures {
                    date: obs.date,
                    location_id: &obs.location_id,
                    item_id: &obs.item_id,
                    inventory_level: obs.inventory_level,
                    demand_forecast: Some(forecast),
                })),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(day: u32, sales: u32, inventory: u32) -> InventoryObservation {
        InventoryObservation {
            date: NaiveDate::from_ymd_opt(2023, 2, day).unwrap(),
            location_id: "Store001".to_string(),
            item_id: "SKU001".to_string(),
            sales_quantity: sales,
            inventory_level: inventory,
        }
    }

    fn views(observations: &[InventoryObservation]) -> Vec<&InventoryObservation> {
        observations.iter().collect()
    }

    #[test]
    fn rolling_mean_shrinks_the_window_at_partition_start() {
        let observations = vec![obs(1, 2, 10), obs(2, 4, 10), obs(3, 6, 10), obs(4, 8, 10)];
        let forecaster = RollingMeanForecaster::new(3);

        let forecasts = forecaster.forecast(&views(&observations));
        assert_eq!(forecasts, vec![2.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn rolling_mean_covers_trailing_min_window_rows() {
        let sales = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        let observations: Vec<_> = sales
            .iter()
            .enumerate()
            .map(|(i, &s)| obs(i as u32 + 1, s, 10))
            .collect();
        let forecaster = RollingMeanForecaster::new(7);

        let forecasts = forecaster.forecast(&views(&observations));
        for (i, forecast) in forecasts.iter().enumerate() {
            let start = (i + 1).saturating_sub(7);
            let window = &sales[start..=i];
            let expected = window.iter().map(|&s| s as f64).sum::<f64>() / window.len() as f64;
            assert!((forecast - expected).abs() < 1e-12, "row {i}");
        }
    }

    #[test]
    fn single_row_partition_forecasts_its_own_sales() {
        let observations = vec![obs(1, 5, 20)];
        let forecaster = RollingMeanForecaster::new(7);
        assert_eq!(forecaster.forecast(&views(&observations)), vec![5.0]);
    }

    #[test]
    fn category_boundaries_are_right_inclusive() {
        let classifier = CoefficientOfVariationClassifier::new(0.1, 0.3);
        assert_eq!(classifier.category_for(0.0), InventoryCategory::A);
        assert_eq!(classifier.category_for(0.1), InventoryCategory::A);
        assert_eq!(classifier.category_for(0.10001), InventoryCategory::B);
        assert_eq!(classifier.category_for(0.3), InventoryCategory::B);
        assert_eq!(classifier.category_for(0.30001), InventoryCategory::C);
    }

    #[test]
    fn constant_sales_classify_as_a_with_zero_cv() {
        let observations: Vec<_> = (1..=8).map(|day| obs(day, 10, 50)).collect();
        let classifier = CoefficientOfVariationClassifier::new(0.1, 0.3);

        let profiles = classifier.classify(&views(&observations), &vec![10.0; 8]);
        assert_eq!(profiles.len(), 8);
        for profile in profiles {
            assert_eq!(profile.coefficient_of_variation, Some(0.0));
            assert_eq!(profile.category, Some(InventoryCategory::A));
        }
    }

    #[test]
    fn single_row_partition_has_undefined_profile() {
        let observations = vec![obs(1, 5, 20)];
        let classifier = CoefficientOfVariationClassifier::new(0.1, 0.3);

        let profiles = classifier.classify(&views(&observations), &[5.0]);
        assert_eq!(profiles[0].coefficient_of_variation, None);
        assert_eq!(profiles[0].category, None);
    }

    #[derive(Debug)]
    struct InventoryEcho;

    impl DemandModel for InventoryEcho {
        fn predict(&self, features: &ObservationFeatures<'_>) -> f64 {
            features.inventory_level as f64 / 2.0
        }
    }

    #[test]
    fn model_forecaster_delegates_row_by_row() {
        let observations = vec![obs(1, 5, 20), obs(2, 5, 30)];
        let forecaster = ModelForecaster::new(Box::new(InventoryEcho));
        assert_eq!(forecaster.forecast(&views(&observations)), vec![10.0, 15.0]);
    }

    #[derive(Debug)]
    struct ForecastThreshold;

    impl CategoryModel for ForecastThreshold {
        fn predict(&self, features: &ObservationFeatures<'_>) -> InventoryCategory {
            if features.demand_forecast.unwrap_or(0.0) > 5.0 {
                InventoryCategory::C
            } else {
                InventoryCategory::A
            }
        }
    }

    #[test]
    fn model_classifier_sees_the_forecast_and_skips_the_cv() {
        let observations = vec![obs(1, 5, 20), obs(2, 5, 30)];
        let classifier = ModelClassifier::new(Box::new(ForecastThreshold));

        let profiles = classifier.classify(&views(&observations), &[2.0, 8.0]);
        assert_eq!(profiles[0].category, Some(InventoryCategory::A));
        assert_eq!(profiles[1].category, Some(InventoryCategory::C));
        assert!(profiles.iter().all(|p| p.coefficient_of_variation.is_none()));
    }
}
