// src/pipeline/engine.rs

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{ConfigError, IntegrityError};
use crate::model::observation::{
    EnrichedObservation, InventoryObservation, LocationTurnover, RawObservation,
};
use crate::model::partition::{partition_observations, Partition, PartitionKey};
use crate::pipeline::config::{PipelineConfig, ReplenishmentFormula};
use crate::pipeline::{stages, statistics};
use crate::strategy::implementations::{CoefficientOfVariationClassifier, RollingMeanForecaster};
use crate::strategy::traits::{DemandForecaster, InventoryClassifier, VariabilityProfile};

/// A partition rejected at intake. Its rows produce no enriched output and
/// do not enter the location aggregates; other partitions are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionFault {
    pub key: PartitionKey,
    pub violations: Vec<IntegrityError>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// One row per valid input row, in input order.
    pub enriched: Vec<EnrichedObservation>,
    /// One row per location, aggregated over all of its valid rows.
    pub location_turnover: Vec<LocationTurnover>,
    pub faults: Vec<PartitionFault>,
}

/// Everything derived from one partition before the formula-variant stages.
struct PartitionEnrichment {
    rows: Vec<usize>,
    forecasts: Vec<f64>,
    profiles: Vec<VariabilityProfile>,
    eoq: Vec<f64>,
    sales_std: Option<f64>,
    total_sales: u64,
    average_inventory_level: f64,
}

/// The replenishment pipeline: partitions the dataset by (location, item),
/// enriches each partition independently, then aggregates turnover across
/// partitions per location.
pub struct ReplenishmentPipeline {
    config: PipelineConfig,
    forecaster: Box<dyn DemandForecaster>,
    classifier: Box<dyn InventoryClassifier>,
}

impl ReplenishmentPipeline {
    /// Validates the configuration before anything runs.
    pub fn new(
        config: PipelineConfig,
        forecaster: Box<dyn DemandForecaster>,
        classifier: Box<dyn InventoryClassifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            forecaster,
            classifier,
        })
    }

    /// The deterministic windowed-statistics strategies, parameterized from
    /// the configuration.
    pub fn with_default_strategies(config: PipelineConfig) -> Result<Self, ConfigError> {
        let forecaster = RollingMeanForecaster::new(config.window_size);
        let classifier =
            CoefficientOfVariationClassifier::new(config.class_a_max, config.class_b_max);
        Self::new(config, Box::new(forecaster), Box::new(classifier))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the full pipeline over a batch of rows.
    pub fn run(&self, rows: Vec<RawObservation>) -> PipelineOutput {
        // Intake: one out-of-contract row poisons its whole partition.
        let mut violations: BTreeMap<PartitionKey, Vec<IntegrityError>> = BTreeMap::new();
        let mut candidates: Vec<InventoryObservation> = Vec::with_capacity(rows.len());
        for raw in rows {
            let key = PartitionKey::new(&raw.location_id, &raw.item_id);
            match raw.validate() {
                Ok(obs) => candidates.push(obs),
                Err(err) => violations.entry(key).or_default().push(err),
            }
        }

        let observations: Vec<InventoryObservation> = candidates
            .into_iter()
            .filter(|obs| {
                !violations.contains_key(&PartitionKey::new(&obs.location_id, &obs.item_id))
            })
            .collect();

        let faults: Vec<PartitionFault> = violations
            .into_iter()
            .map(|(key, violations)| PartitionFault { key, violations })
            .collect();
        for fault in &faults {
            warn!(partition = %fault.key, violations = fault.violations.len(), "partition rejected");
        }

        let partitions = partition_observations(&observations);
        info!(
            rows = observations.len(),
            partitions = partitions.len(),
            "enriching partitions"
        );

        // Per-partition enrichment is independent of every other partition.
        let enrichments: Vec<PartitionEnrichment> = partitions
            .par_iter()
            .map(|partition| self.enrich_partition(partition, &observations))
            .collect();

        // The lead-time buffer reads the forecast spread of the whole run,
        // so it has to wait for every partition.
        let forecast_std = match self.config.formula {
            ReplenishmentFormula::LeadTimeDemand => {
                let forecasts: Vec<f64> = enrichments
                    .iter()
                    .flat_map(|e| e.forecasts.iter().copied())
                    .collect();
                statistics::sample_std(&forecasts)
            }
            ReplenishmentFormula::PartitionVariability => None,
        };

        let mut slots: Vec<Option<EnrichedObservation>> = vec![None; observations.len()];
        for enrichment in &enrichments {
            self.fill_partition(enrichment, forecast_std, &observations, &mut slots);
        }
        let enriched: Vec<EnrichedObservation> = slots.into_iter().flatten().collect();

        let location_turnover = location_turnover(&observations);

        PipelineOutput {
            enriched,
            location_turnover,
            faults,
        }
    }

    fn enrich_partition(
        &self,
        partition: &Partition,
        observations: &[InventoryObservation],
    ) -> PartitionEnrichment {
        let view: Vec<&InventoryObservation> =
            partition.rows.iter().map(|&i| &observations[i]).collect();

        let forecasts = self.forecaster.forecast(&view);
        let profiles = self.classifier.classify(&view, &forecasts);
        let eoq = forecasts
            .iter()
            .map(|&demand| {
                stages::economic_order_quantity(
                    demand,
                    self.config.ordering_cost,
                    self.config.holding_cost,
                )
            })
            .collect();

        let sales: Vec<f64> = view.iter().map(|obs| obs.sales_quantity as f64).collect();
        let inventory: Vec<f64> = view.iter().map(|obs| obs.inventory_level as f64).collect();

        PartitionEnrichment {
            rows: partition.rows.clone(),
            forecasts,
            profiles,
            eoq,
            sales_std: statistics::sample_std(&sales),
            total_sales: view.iter().map(|obs| obs.sales_quantity as u64).sum(),
            // Partitions are never empty.
            average_inventory_level: statistics::mean(&inventory).unwrap_or(0.0),
        }
    }

    fn fill_partition(
        &self,
        enrichment: &PartitionEnrichment,
        forecast_std: Option<f64>,
        observations: &[InventoryObservation],
        slots: &mut [Option<EnrichedObservation>],
    ) {
        let safety_stock = match self.config.formula {
            ReplenishmentFormula::PartitionVariability => {
                stages::variability_safety_stock(self.config.service_level_z, enrichment.sales_std)
            }
            ReplenishmentFormula::LeadTimeDemand => stages::lead_time_safety_stock(
                self.config.service_level_z,
                self.config.lead_time_days,
                forecast_std,
            ),
        };
        let inventory_turnover =
            stages::turnover_ratio(enrichment.total_sales, enrichment.average_inventory_level);

        for (pos, &index) in enrichment.rows.iter().enumerate() {
            let obs = &observations[index];
            let eoq = enrichment.eoq[pos];
            let profile = enrichment.profiles[pos];

            let reorder_point = match self.config.formula {
                ReplenishmentFormula::PartitionVariability => stages::inventory_mean_reorder_point(
                    safety_stock,
                    enrichment.average_inventory_level,
                ),
                ReplenishmentFormula::LeadTimeDemand => {
                    stages::lead_time_reorder_point(safety_stock, eoq, self.config.lead_time_days)
                }
            };

            let (should_reorder, order_quantity) = match reorder_point {
                Some(point) => {
                    let decision = stages::reorder_decision(obs.inventory_level, point);
                    (Some(decision.should_reorder), Some(decision.order_quantity))
                }
                None => (None, None),
            };

            slots[index] = Some(EnrichedObservation {
                date: obs.date,
                location_id: obs.location_id.clone(),
                item_id: obs.item_id.clone(),
                sales_quantity: obs.sales_quantity,
                inventory_level: obs.inventory_level,
                demand_forecast: enrichment.forecasts[pos],
                coefficient_of_variation: profile.coefficient_of_variation,
                inventory_category: profile.category,
                safety_stock,
                eoq,
                reorder_point,
                should_reorder,
                order_quantity,
                total_sales: enrichment.total_sales,
                average_inventory_level: enrichment.average_inventory_level,
                inventory_turnover,
            });
        }
    }
}

/// Location turnover is a sum/mean over every valid row at the location,
/// never an aggregate of the per-partition ratios.
fn location_turnover(observations: &[InventoryObservation]) -> Vec<LocationTurnover> {
    let mut by_location: BTreeMap<&str, (u64, u64, u64)> = BTreeMap::new();
    for obs in observations {
        let entry = by_location
            .entry(obs.location_id.as_str())
            .or_insert((0, 0, 0));
        entry.0 += obs.sales_quantity as u64;
        entry.1 += obs.inventory_level as u64;
        entry.2 += 1;
    }

    by_location
        .into_iter()
        .map(|(location_id, (total_sales, inventory_sum, count))| {
            let average_inventory_level = inventory_sum as f64 / count as f64;
            LocationTurnover {
                location_id: location_id.to_string(),
                total_sales,
                average_inventory_level,
                inventory_turnover: stages::turnover_ratio(total_sales, average_inventory_level),
            }
        })
        .collect()
}
