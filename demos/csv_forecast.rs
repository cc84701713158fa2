use incident_forecast::models::holt_linear::HoltLinear;
use incident_forecast::pipeline::{run_forecast, ForecastQuery};
use incident_forecast::store::{CsvSchema, LabelFilter, MemoryRecordStore};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Incident Forecast: CSV Ingestion Example");
    println!("========================================\n");

    // A small semicolon-separated export in the municipal style
    let csv_path = std::env::temp_dir().join("incident_forecast_demo.csv");
    fs::write(&csv_path, sample_export())?;
    println!("Wrote sample export to {}", csv_path.display());

    let schema = CsvSchema {
        timestamp_column: "entry_date".to_string(),
        theme_column: "theme".to_string(),
        neighborhood_column: "neighborhood".to_string(),
        delimiter: b';',
        excluded_neighborhoods: vec!["OUT OF TOWN".to_string()],
    };

    let store = MemoryRecordStore::from_csv_path(&csv_path, &schema)?;
    println!(
        "Loaded {} records; neighborhoods: {:?}\n",
        store.len(),
        store.neighborhoods()
    );

    let query = ForecastQuery {
        theme: LabelFilter::Any,
        neighborhood: LabelFilter::exact("CENTRE"),
        horizon_periods: 3,
        test_size: 2,
    };

    let model = HoltLinear::new(0.5, 0.3)?;
    let bundle = run_forecast(&store, &query, &model)?;

    println!("{}", bundle.metrics);
    println!("Observed months: {}", bundle.observed.len());
    for point in &bundle.projected_future {
        println!(
            "  {}: {:.1} incidents  [{:.1}, {:.1}]",
            point.period, point.point_estimate, point.lower_bound, point.upper_bound
        );
    }

    fs::remove_file(&csv_path)?;

    Ok(())
}

/// Twelve months of CENTRE incidents with a couple of rows the loader must
/// drop (unparseable timestamp, excluded neighborhood)
fn sample_export() -> String {
    let mut csv = String::from("entry_date;theme;neighborhood\n");

    for month in 1..=12u32 {
        let volume = 3 + (month % 4);
        for day in 1..=volume {
            csv.push_str(&format!("2023-{:02}-{:02};NOISE;centre\n", month, day));
        }
    }

    csv.push_str("not-a-date;NOISE;CENTRE\n");
    csv.push_str("2023-06-15;NOISE;Out of Town\n");

    csv
}
