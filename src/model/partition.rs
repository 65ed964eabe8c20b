// src/model/partition.rs

use std::collections::BTreeMap;

use crate::model::observation::InventoryObservation;

/// Identifies one (location, item) time series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    pub location_id: String,
    pub item_id: String,
}

impl PartitionKey {
    pub fn new(location_id: &str, item_id: &str) -> Self {
        Self {
            location_id: location_id.to_string(),
            item_id: item_id.to_string(),
        }
    }
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.location_id, self.item_id)
    }
}

/// The observations of one (location, item) pair, as indices into the shared
/// observation slice, ordered by date ascending. Rows sharing a date keep
/// their input order. Every windowed and aggregate computation downstream
/// relies on this ordering.
#[derive(Debug, Clone)]
pub struct Partition {
    pub key: PartitionKey,
    pub rows: Vec<usize>,
}

/// Groups observations by (location, item) and date-orders each group.
/// Every input row lands in exactly one partition.
pub fn partition_observations(observations: &[InventoryObservation]) -> Vec<Partition> {
    let mut groups: BTreeMap<PartitionKey, Vec<usize>> = BTreeMap::new();
    for (index, obs) in observations.iter().enumerate() {
        groups
            .entry(PartitionKey::new(&obs.location_id, &obs.item_id))
            .or_default()
            .push(index);
    }

    groups
        .into_iter()
        .map(|(key, mut rows)| {
            // Stable sort: same-date rows stay in input order.
            rows.sort_by_key(|&index| observations[index].date);
            Partition { key, rows }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(location: &str, item: &str, day: u32, sales: u32) -> InventoryObservation {
        InventoryObservation {
            date: NaiveDate::from_ymd_opt(2023, 6, day).unwrap(),
            location_id: location.to_string(),
            item_id: item.to_string(),
            sales_quantity: sales,
            inventory_level: 50,
        }
    }

    #[test]
    fn groups_by_location_and_item() {
        let observations = vec![
            obs("Store001", "SKU001", 1, 5),
            obs("Store001", "SKU002", 1, 6),
            obs("Store002", "SKU001", 1, 7),
            obs("Store001", "SKU001", 2, 8),
        ];

        let partitions = partition_observations(&observations);
        assert_eq!(partitions.len(), 3);

        let total_rows: usize = partitions.iter().map(|p| p.rows.len()).sum();
        assert_eq!(total_rows, observations.len());

        let first = partitions
            .iter()
            .find(|p| p.key == PartitionKey::new("Store001", "SKU001"))
            .unwrap();
        assert_eq!(first.rows, vec![0, 3]);
    }

    #[test]
    fn orders_rows_by_date_within_a_partition() {
        let observations = vec![
            obs("Store001", "SKU001", 9, 1),
            obs("Store001", "SKU001", 2, 2),
            obs("Store001", "SKU001", 5, 3),
        ];

        let partitions = partition_observations(&observations);
        assert_eq!(partitions[0].rows, vec![1, 2, 0]);
    }

    #[test]
    fn same_date_rows_keep_input_order() {
        let observations = vec![
            obs("Store001", "SKU001", 4, 1),
            obs("Store001", "SKU001", 4, 2),
            obs("Store001", "SKU001", 3, 3),
            obs("Store001", "SKU001", 4, 4),
        ];

        let partitions = partition_observations(&observations);
        assert_eq!(partitions[0].rows, vec![2, 0, 1, 3]);
    }
}
