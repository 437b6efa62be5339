use chrono::NaiveDate;
use fuel_stats::{
    AggregateSummary, ConsumptionSeries, DateRange, FillUp, GroupBy, GroupKey, Label,
    NormalizedFillUps, Normalizer, RawFillUp, Selection, StatsEngine, VehicleDirectory,
    VehicleSelector, Window,
};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn everything() -> Selection {
    Selection::new(
        VehicleSelector::All,
        DateRange::new(date(2000, 1, 1), date(2099, 12, 31)),
    )
}

#[test]
fn empty_input_gives_null_summary_and_empty_series() {
    let report = StatsEngine::default().report(&[], &everything()).unwrap();

    assert_eq!(report.summary, AggregateSummary::default());
    assert!(report.consumption.is_empty());
    assert!(report.by_brand_grade.is_empty());
    assert!(report.by_month.is_empty());
    assert!(report.rankings.best_fill_up.is_none());

    let json = serde_json::to_value(&report.summary).unwrap();
    for field in [
        "totalSpend",
        "totalLiters",
        "totalDistance",
        "avgCostPerLiter",
        "avgConsumption",
        "avgCostPerDistance",
        "avgDistancePerDay",
    ] {
        assert!(json[field].is_null(), "{} should be null", field);
    }
}

#[test]
fn raw_json_batch_end_to_end() {
    let raw: Vec<RawFillUp> = serde_json::from_str(
        r#"[
            {"id": 2, "vehicleId": "car", "date": "2024-01-15", "odometerReading": "10500",
             "liters": 38, "totalAmount": 68.4, "fuelBrand": "Shell"},
            {"id": "1", "vehicleId": "car", "date": "2024-01-01", "odometer": 10000,
             "liters": "40", "totalAmount": 72, "fuelBrand": "Shell"},
            {"id": "3", "vehicleId": "car", "date": "2024-01-20", "liters": 10, "totalAmount": 18},
            {"id": "4", "vehicleId": "car", "date": "2024-01-25", "odometerReading": 10900,
             "liters": "lots", "totalAmount": 18}
        ]"#,
    )
    .unwrap();

    let report = StatsEngine::default().report(&raw, &everything()).unwrap();

    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.rejected[0].id.as_deref(), Some("3"));
    assert_eq!(report.rejected[1].id.as_deref(), Some("4"));

    assert_eq!(report.consumption.len(), 1);
    assert_eq!(report.consumption[0].distance, 500);
    assert!((report.consumption[0].consumption_per_distance - 7.6).abs() < 1e-9);
    assert_eq!(report.summary.total_distance, Some(500));
}

#[test]
fn odometer_regression_skips_one_pair() {
    let fills = vec![
        FillUp::new("a", "car", date(2024, 1, 1), 10_000, 40.0, 72.0),
        FillUp::new("b", "car", date(2024, 1, 10), 9_800, 35.0, 63.0),
        FillUp::new("c", "car", date(2024, 1, 20), 10_600, 42.0, 75.6),
    ];
    let report = StatsEngine::default()
        .report_normalized(&NormalizedFillUps::from_fill_ups(fills), &everything())
        .unwrap();

    assert_eq!(report.skipped_pairs, 1);
    assert_eq!(report.consumption.len(), 1);
    assert_eq!(report.consumption[0].distance, 800);
    assert_eq!(report.per_fill[1].distance_since_last, Some(-200));
}

#[test]
fn shell_twice_bp_once() {
    let fills = vec![
        FillUp::new("a", "car", date(2024, 1, 1), 10_000, 40.0, 72.0).with_brand("Shell"),
        FillUp::new("b", "car", date(2024, 1, 8), 10_400, 30.0, 54.0).with_brand("BP"),
        FillUp::new("c", "car", date(2024, 1, 15), 10_900, 35.0, 63.0).with_brand("Shell"),
    ];
    let normalized = NormalizedFillUps::from_fill_ups(fills);
    let groups = Window::select(&normalized, &everything()).group_by(GroupBy::Brand);

    let counts: Vec<(GroupKey, usize)> = groups.into_iter().map(|g| (g.key, g.fill_up_count)).collect();
    assert_eq!(
        counts,
        [
            (GroupKey::Brand { brand: Label::Named("BP".to_string()) }, 1),
            (GroupKey::Brand { brand: Label::Named("Shell".to_string()) }, 2),
        ]
    );
}

#[test]
fn window_keeps_delta_from_fill_before_it() {
    let fills = vec![
        FillUp::new("a", "car", date(2024, 1, 28), 10_000, 40.0, 72.0),
        FillUp::new("b", "car", date(2024, 2, 3), 10_400, 30.0, 54.0),
    ];
    let normalized = NormalizedFillUps::from_fill_ups(fills);
    let february = Selection::new(
        VehicleSelector::vehicle("car"),
        DateRange::new(date(2024, 2, 1), date(2024, 2, 29)),
    );
    let mut directory = VehicleDirectory::new();
    directory.insert("car".into(), "Golf");

    let report = StatsEngine::new(directory)
        .report_normalized(&normalized, &february)
        .unwrap();
    assert_eq!(report.summary.fill_up_count, 1);
    assert_eq!(report.summary.total_distance, Some(400));
    assert!((report.summary.avg_consumption.unwrap() - 7.5).abs() < 1e-9);
    assert_eq!(report.summary.avg_distance_per_day, Some(400.0 / 29.0));
}

fn arb_history() -> impl Strategy<Value = Vec<FillUp>> {
    proptest::collection::vec((0u32..365, 0u64..200_000, 1u32..80, 0u32..200, 0usize..3), 0..40)
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (day, odometer, liters, amount, vehicle))| {
                    FillUp::new(
                        format!("f{}", i),
                        ["car", "van", "bike"][vehicle],
                        date(2024, 1, 1) + chrono::Days::new(day as u64),
                        odometer,
                        liters as f64,
                        amount as f64,
                    )
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn avg_cost_per_liter_matches_direct_sums(fills in arb_history()) {
        let total_spend: f64 = fills.iter().map(|f| f.total_amount).sum();
        let total_liters: f64 = fills.iter().map(|f| f.liters).sum();
        let normalized = NormalizedFillUps::from_fill_ups(fills.clone());
        let summary = Window::select(&normalized, &everything()).summary();

        if fills.is_empty() {
            prop_assert_eq!(summary.avg_cost_per_liter, None);
        } else {
            let expected = total_spend / total_liters;
            let actual = summary.avg_cost_per_liter.unwrap();
            prop_assert!((actual - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn point_count_bounded_per_vehicle(fills in arb_history()) {
        let normalized = NormalizedFillUps::from_fill_ups(fills);
        for (_, history) in normalized.histories() {
            let series = ConsumptionSeries::new(history);
            let count = series.iter().count();
            prop_assert!(count <= history.len().saturating_sub(1));
            let regressed = history
                .windows(2)
                .any(|pair| pair[1].odometer_reading <= pair[0].odometer_reading);
            if regressed {
                prop_assert!(count < history.len() - 1);
            }
        }
    }

    #[test]
    fn brand_grade_groups_cover_window(fills in arb_history()) {
        let normalized = NormalizedFillUps::from_fill_ups(fills);
        let window = Window::select(&normalized, &everything());
        let total: usize = window.group_by(GroupBy::BrandGrade).iter().map(|g| g.fill_up_count).sum();
        prop_assert_eq!(total, window.fill_ups().len());
    }

    #[test]
    fn normalizing_raw_records_loses_nothing_valid(fills in arb_history()) {
        let raw: Vec<RawFillUp> = fills.iter().cloned().map(RawFillUp::from).collect();
        let outcome = Normalizer::default().normalize(&raw);
        prop_assert!(outcome.rejected.is_empty());
        prop_assert_eq!(outcome.fill_ups, NormalizedFillUps::from_fill_ups(fills));
    }
}
