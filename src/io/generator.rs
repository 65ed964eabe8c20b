// src/io/generator.rs

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::io::calendar::HolidayCalendar;
use crate::model::observation::RawObservation;

/// Generates one row per (date, location, item) over an inclusive date range.
///
/// Sales are uniform in 1..20 with a +10 uplift on holidays; inventory is
/// uniform in 0..100. Seeded so runs are reproducible.
pub fn generate_observations(
    start: NaiveDate,
    end: NaiveDate,
    locations: &[&str],
    items: &[&str],
    calendar: &dyn HolidayCalendar,
    seed: u64,
) -> Vec<RawObservation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        let uplift = if calendar.is_holiday(date) { 10 } else { 0 };
        for location in locations {
            for item in items {
                rows.push(RawObservation {
                    date,
                    location_id: location.to_string(),
                    item_id: item.to_string(),
                    sales_quantity: rng.gen_range(1..20) + uplift,
                    inventory_level: rng.gen_range(0..100),
                });
            }
        }
    }

    rows
}

/// Same grid, but sales drawn from a Normal (Bell Curve) distribution,
/// rounded and clamped at zero. Useful for exercising the classifier against
/// a chosen volatility.
pub fn generate_normal_observations(
    start: NaiveDate,
    end: NaiveDate,
    locations: &[&str],
    items: &[&str],
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Vec<RawObservation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    let mut rows = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        for location in locations {
            for item in items {
                let sample: f64 = normal.sample(&mut rng);
                let sales = sample.round().max(0.0) as i64;
                rows.push(RawObservation {
                    date,
                    location_id: location.to_string(),
                    item_id: item.to_string(),
                    sales_quantity: sales,
                    inventory_level: rng.gen_range(0..100),
                });
            }
        }
    }

    rows
}
