use chrono::NaiveDate;
use inventory_optimization::io::calendar::FixedHolidayCalendar;
use inventory_optimization::io::{generator, reporting};
use inventory_optimization::pipeline::config::PipelineConfig;
use inventory_optimization::pipeline::engine::ReplenishmentPipeline;
use std::env;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Inventory Replenishment Analytics ===");

    // 1. SETUP CONFIGURATION
    // Defaults: 7-day rolling window, CV thresholds 0.1/0.3, z = 1.96,
    // ordering cost 100, holding cost 5, lead time 7 days, and the
    // partition-variability formula for safety stock / reorder point.
    let config = PipelineConfig::default();

    // 2. OBTAIN INPUT DATA
    // Pass a CSV path to analyze real data; otherwise we generate a year of
    // synthetic daily sales for 3 stores x 3 SKUs, with festival dates
    // lifting demand.
    let rows = match env::args().nth(1) {
        Some(path) => match reporting::read_observations(&path) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Error reading '{}': {}", path, e);
                return;
            }
        },
        None => {
            let festivals = FixedHolidayCalendar::new([
                NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 26).unwrap(),
                NaiveDate::from_ymd_opt(2023, 8, 15).unwrap(),
                NaiveDate::from_ymd_opt(2023, 11, 12).unwrap(),
            ]);
            generator::generate_observations(
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
                &["Store001", "Store002", "Store003"],
                &["SKU001", "SKU002", "SKU003"],
                &festivals,
                0,
            )
        }
    };
    println!("Loaded {} observation rows", rows.len());

    // 3. BUILD THE PIPELINE
    let pipeline = match ReplenishmentPipeline::with_default_strategies(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    // 4. RUN THE ANALYSIS
    let output = pipeline.run(rows);

    // 5. EXPORT RESULTS
    if let Err(e) = reporting::write_enriched("replenishment_output.csv", &output.enriched) {
        eprintln!("Error writing CSV: {}", e);
    }
    if let Err(e) =
        reporting::write_location_turnover("location_turnover.csv", &output.location_turnover)
    {
        eprintln!("Error writing CSV: {}", e);
    }

    // 6. PRINT TURNOVER ANALYSIS
    println!("\n=== Location Turnover ===");
    for row in &output.location_turnover {
        match row.inventory_turnover {
            Some(turnover) => println!(
                "{}: {:.2} (sales {}, avg inventory {:.1})",
                row.location_id, turnover, row.total_sales, row.average_inventory_level
            ),
            None => println!("{}: undefined (no inventory held)", row.location_id),
        }
    }

    let reorders = output
        .enriched
        .iter()
        .filter(|row| row.should_reorder == Some(true))
        .count();
    println!(
        "\n{} of {} rows call for a reorder",
        reorders,
        output.enriched.len()
    );

    if !output.faults.is_empty() {
        println!("\n{} partition(s) rejected at intake:", output.faults.len());
        for fault in &output.faults {
            for violation in &fault.violations {
                println!("  {}", violation);
            }
        }
    }

    println!("\nAnalysis Complete.");
}
