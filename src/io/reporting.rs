// src/io/reporting.rs

use std::error::Error;
use std::path::Path;

use crate::model::observation::{EnrichedObservation, LocationTurnover, RawObservation};

/// Reads raw observation rows from a CSV file with a header row.
pub fn read_observations(file_path: &str) -> Result<Vec<RawObservation>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(Path::new(file_path))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Writes the enriched table to a CSV file, replacing any previous file.
/// Undefined statistics become empty cells.
pub fn write_enriched(file_path: &str, data: &[EnrichedObservation]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(Path::new(file_path))?;

    for record in data {
        writer.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    writer.flush()?;

    println!(
        "Successfully exported {} rows to '{}'",
        data.len(),
        file_path
    );
    Ok(())
}

/// Writes the per-location turnover table, replacing any previous file.
pub fn write_location_turnover(
    file_path: &str,
    data: &[LocationTurnover],
) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(Path::new(file_path))?;

    for record in data {
        writer.serialize(record)?;
    }
    writer.flush()?;

    println!(
        "Successfully exported {} rows to '{}'",
        data.len(),
        file_path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::observation::InventoryCategory;
    use chrono::NaiveDate;

    #[test]
    fn raw_rows_deserialize_from_csv() {
        let data = "\
date,location_id,item_id,sales_quantity,inventory_level
2023-01-01,Store001,SKU001,5,40
2023-01-02,Store001,SKU001,7,35
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<RawObservation> = reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(rows[1].sales_quantity, 7);
    }

    #[test]
    fn missing_statistics_serialize_as_empty_cells() {
        let record = EnrichedObservation {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            location_id: "Store001".to_string(),
            item_id: "SKU001".to_string(),
            sales_quantity: 5,
            inventory_level: 20,
            demand_forecast: 5.0,
            coefficient_of_variation: None,
            inventory_category: None,
            safety_stock: None,
            eoq: 20.0,
            reorder_point: None,
            should_reorder: None,
            order_quantity: None,
            total_sales: 5,
            average_inventory_level: 20.0,
            inventory_turnover: Some(0.25),
        };

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&record).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let line = text.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "2023-01-01,Store001,SKU001,5,20,5.0,,,,20.0,,,,5,20.0,0.25"
        );
    }

    #[test]
    fn categories_serialize_by_name() {
        let record = EnrichedObservation {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            location_id: "Store001".to_string(),
            item_id: "SKU001".to_string(),
            sales_quantity: 10,
            inventory_level: 40,
            demand_forecast: 10.0,
            coefficient_of_variation: Some(0.0),
            inventory_category: Some(InventoryCategory::A),
            safety_stock: Some(0.0),
            eoq: 20.0,
            reorder_point: Some(40.0),
            should_reorder: Some(false),
            order_quantity: Some(0.0),
            total_sales: 80,
            average_inventory_level: 40.0,
            inventory_turnover: Some(2.0),
        };

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&record).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert!(text.lines().nth(1).unwrap().contains(",A,"));
    }
}
