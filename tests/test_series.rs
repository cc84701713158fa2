use chrono::NaiveDate;
use incident_forecast::series::{build_series, fill_monthly_gaps, Period, TimeSeriesPoint};
use incident_forecast::store::{IncidentRecord, LabelFilter};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn record(year: i32, month: u32, day: u32, theme: &str, neighborhood: &str) -> IncidentRecord {
    IncidentRecord {
        timestamp: NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        theme: theme.to_string(),
        neighborhood: neighborhood.to_string(),
    }
}

fn sample_records() -> Vec<IncidentRecord> {
    vec![
        record(2023, 1, 3, "NOISE", "CENTRE"),
        record(2023, 1, 17, "NOISE", "CENTRE"),
        record(2023, 1, 20, "WASTE", "CENTRE"),
        record(2023, 2, 5, "NOISE", "NORTH"),
        record(2023, 4, 9, "NOISE", "CENTRE"),
        record(2023, 4, 22, "WASTE", "NORTH"),
    ]
}

#[rstest]
#[case(LabelFilter::Any, LabelFilter::Any, 6)]
#[case(LabelFilter::exact("NOISE"), LabelFilter::Any, 4)]
#[case(LabelFilter::exact("NOISE"), LabelFilter::exact("CENTRE"), 3)]
#[case(LabelFilter::Any, LabelFilter::exact("NORTH"), 2)]
fn count_sum_equals_surviving_records(
    #[case] theme: LabelFilter,
    #[case] neighborhood: LabelFilter,
    #[case] expected_total: u64,
) {
    let series = build_series(&sample_records(), &theme, &neighborhood);
    let total: u64 = series.iter().map(|point| point.count).sum();
    assert_eq!(total, expected_total);
}

#[test]
fn occupied_months_only_sorted_ascending() {
    let series = build_series(&sample_records(), &LabelFilter::Any, &LabelFilter::Any);

    // March has no records and must not be synthesized
    let periods: Vec<String> = series.iter().map(|p| p.period.to_string()).collect();
    assert_eq!(periods, vec!["2023-01", "2023-02", "2023-04"]);

    assert_eq!(series[0].count, 3);
    assert_eq!(series[1].count, 1);
    assert_eq!(series[2].count, 2);
}

#[test]
fn no_matching_records_yields_empty_series() {
    let series = build_series(
        &sample_records(),
        &LabelFilter::exact("NONEXISTENT"),
        &LabelFilter::Any,
    );
    assert!(series.is_empty());
}

#[test]
fn fill_monthly_gaps_inserts_zero_months() {
    let series = build_series(&sample_records(), &LabelFilter::Any, &LabelFilter::Any);
    let filled = fill_monthly_gaps(&series);

    let periods: Vec<String> = filled.iter().map(|p| p.period.to_string()).collect();
    assert_eq!(periods, vec!["2023-01", "2023-02", "2023-03", "2023-04"]);

    assert_eq!(filled[2].count, 0);

    // Occupied counts are preserved
    let original_total: u64 = series.iter().map(|p| p.count).sum();
    let filled_total: u64 = filled.iter().map(|p| p.count).sum();
    assert_eq!(original_total, filled_total);
}

#[test]
fn fill_monthly_gaps_on_empty_series() {
    assert!(fill_monthly_gaps(&[]).is_empty());
}

#[test]
fn period_parses_and_displays_iso_months() {
    let period: Period = "2023-07".parse().unwrap();
    assert_eq!(period.year(), 2023);
    assert_eq!(period.month(), 7);
    assert_eq!(period.to_string(), "2023-07");

    assert!("2023-13".parse::<Period>().is_err());
    assert!("not-a-month".parse::<Period>().is_err());
}

#[test]
fn period_next_rolls_over_the_year() {
    let december: Period = "2023-12".parse().unwrap();
    assert_eq!(december.next().to_string(), "2024-01");

    let january: Period = "2024-01".parse().unwrap();
    assert_eq!(january.plus_months(-1), december);
    assert_eq!(december.months_until(&january), 1);
}

#[test]
fn period_orders_by_calendar_identity() {
    let a: Period = "2022-12".parse().unwrap();
    let b: Period = "2023-01".parse().unwrap();
    let c: Period = "2023-02".parse().unwrap();
    assert!(a < b && b < c);
}

#[test]
fn period_serializes_as_iso_string() {
    let point = TimeSeriesPoint {
        period: "2023-09".parse().unwrap(),
        count: 4,
    };

    let json = serde_json::to_string(&point).unwrap();
    assert_eq!(json, r#"{"period":"2023-09","count":4}"#);

    let back: TimeSeriesPoint = serde_json::from_str(&json).unwrap();
    assert_eq!(back, point);
}
