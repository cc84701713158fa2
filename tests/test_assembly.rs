use incident_forecast::assembly::assemble;
use incident_forecast::evaluation::EvaluationMetrics;
use incident_forecast::models::holt_linear::HoltLinear;
use incident_forecast::series::{Period, TimeSeriesPoint};
use incident_forecast::ForecastError;
use pretty_assertions::assert_eq;

fn monthly_series(start: &str, counts: &[u64]) -> Vec<TimeSeriesPoint> {
    let mut period: Period = start.parse().unwrap();
    counts
        .iter()
        .map(|&count| {
            let point = TimeSeriesPoint { period, count };
            period = period.next();
            point
        })
        .collect()
}

fn dummy_metrics() -> EvaluationMetrics {
    EvaluationMetrics {
        mae: 1.5,
        rmse: 2.0,
        mape: 12.5,
    }
}

#[test]
fn horizon_three_projects_exactly_three_months() {
    // Series ending 2023-08, horizon 3
    let series = monthly_series("2023-01", &[10, 12, 9, 15, 11, 14, 13, 16]);
    let model = HoltLinear::new(0.5, 0.3).unwrap();

    let bundle = assemble(&series, 3, dummy_metrics(), &model).unwrap();

    let future: Vec<String> = bundle
        .projected_future
        .iter()
        .map(|p| p.period.to_string())
        .collect();
    assert_eq!(future, vec!["2023-09", "2023-10", "2023-11"]);

    for point in &bundle.projected_future {
        assert!(point.point_estimate >= 0.0);
    }
}

#[test]
fn historical_and_future_partition_at_the_cutoff() {
    let series = monthly_series("2023-01", &[10, 12, 9, 15, 11, 14, 13, 16]);
    let model = HoltLinear::new(0.5, 0.3).unwrap();

    let bundle = assemble(&series, 4, dummy_metrics(), &model).unwrap();
    let cutoff = bundle.cutoff().unwrap();
    assert_eq!(cutoff.to_string(), "2023-08");

    assert_eq!(bundle.fitted_historical.len(), series.len());
    for point in &bundle.fitted_historical {
        assert!(point.period <= cutoff);
    }
    for point in &bundle.projected_future {
        assert!(point.period > cutoff);
    }

    // No period appears in both segments
    for future_point in &bundle.projected_future {
        assert!(!bundle
            .fitted_historical
            .iter()
            .any(|p| p.period == future_point.period));
    }
}

#[test]
fn connection_point_is_the_last_historical_point() {
    let series = monthly_series("2023-01", &[10, 12, 9, 15, 11, 14, 13, 16]);
    let model = HoltLinear::new(0.5, 0.3).unwrap();

    let bundle = assemble(&series, 2, dummy_metrics(), &model).unwrap();

    let connection = bundle.connection_point().unwrap();
    assert_eq!(connection.period, bundle.cutoff().unwrap());
    assert_eq!(
        connection.period,
        bundle.fitted_historical.last().unwrap().period
    );
}

#[test]
fn every_field_is_clamped_to_zero() {
    // Steeply falling counts push the linear extrapolation below zero
    let series = monthly_series("2023-01", &[30, 26, 22, 18, 14, 10, 6, 2]);
    let model = HoltLinear::new(0.4, 0.2).unwrap();

    let bundle = assemble(&series, 3, dummy_metrics(), &model).unwrap();

    for point in bundle
        .fitted_historical
        .iter()
        .chain(bundle.projected_future.iter())
    {
        assert!(point.point_estimate >= 0.0);
        assert!(point.lower_bound >= 0.0);
        assert!(point.upper_bound >= point.lower_bound);
    }

    // The raw extrapolation for 2023-09 would be negative
    assert_eq!(bundle.projected_future[0].point_estimate, 0.0);
}

#[test]
fn empty_series_cannot_be_assembled() {
    let model = HoltLinear::new(0.5, 0.3).unwrap();

    assert!(matches!(
        assemble(&[], 6, dummy_metrics(), &model),
        Err(ForecastError::InsufficientData {
            required: 1,
            actual: 0
        })
    ));
}

#[test]
fn zero_horizon_yields_no_future_segment() {
    let series = monthly_series("2023-01", &[10, 12, 9, 15, 11, 14]);
    let model = HoltLinear::new(0.5, 0.3).unwrap();

    let bundle = assemble(&series, 0, dummy_metrics(), &model).unwrap();

    assert!(bundle.projected_future.is_empty());
    assert_eq!(bundle.fitted_historical.len(), series.len());
}

#[test]
fn metrics_are_carried_through_unchanged() {
    let series = monthly_series("2023-01", &[10, 12, 9, 15, 11, 14]);
    let model = HoltLinear::new(0.5, 0.3).unwrap();

    let bundle = assemble(&series, 2, dummy_metrics(), &model).unwrap();
    assert_eq!(bundle.metrics, dummy_metrics());
}

#[test]
fn bundle_serializes_periods_as_iso_strings() {
    let series = monthly_series("2023-06", &[10, 12, 9, 15, 11, 14, 13, 16]);
    let model = HoltLinear::new(0.5, 0.3).unwrap();

    let bundle = assemble(&series, 2, dummy_metrics(), &model).unwrap();
    let json = serde_json::to_value(&bundle).unwrap();

    assert_eq!(json["observed"][0]["period"], "2023-06");
    assert_eq!(json["projected_future"][0]["period"], "2024-02");
    assert!(json["projected_future"][0]["point_estimate"].as_f64().unwrap() >= 0.0);
}
