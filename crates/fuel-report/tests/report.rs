use chrono::NaiveDate;
use fuel_record::{FillUp, RawFillUp, VehicleSelector};
use fuel_report::{render, run, JsonFileSource, Query, ReportConfig, ReportError};
use fuel_stats::GroupKey;
use fuel_stats::UnitSystem;
use std::io::Write;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn batch() -> Vec<RawFillUp> {
    vec![
        FillUp::new("a", "car", date(2024, 1, 1), 10_000, 40.0, 72.0).with_brand("Shell"),
        FillUp::new("b", "car", date(2024, 1, 15), 10_500, 38.0, 68.4).with_brand("Shell"),
        FillUp::new("c", "car", date(2024, 2, 20), 11_200, 45.0, 81.0).with_brand("BP"),
    ]
    .into_iter()
    .map(RawFillUp::from)
    .collect()
}

#[test]
fn default_window_ends_today() {
    let query = Query::default();
    let selection = query.selection(date(2024, 2, 20), 30).unwrap();
    assert_eq!(selection.range.start, date(2024, 1, 22));
    assert_eq!(selection.range.end, date(2024, 2, 20));
    assert_eq!(selection.range.days(), Some(30));
}

#[test]
fn explicit_start_wins_over_days() {
    let query = Query {
        start: Some(date(2024, 1, 1)),
        end: Some(date(2024, 1, 31)),
        days: Some(7),
        ..Default::default()
    };
    let selection = query.selection(date(2024, 6, 1), 30).unwrap();
    assert_eq!(selection.range.start, date(2024, 1, 1));
    assert_eq!(selection.range.end, date(2024, 1, 31));
}

#[test]
fn runs_report_with_directory_labels() {
    let mut vehicles = tempfile::NamedTempFile::new().unwrap();
    write!(vehicles, r#"[{{"id": "car", "displayName": "Golf"}}]"#).unwrap();

    let config = ReportConfig {
        vehicles: Some(vehicles.path().to_path_buf()),
        units: UnitSystem::Imperial,
        ..Default::default()
    };
    let query = Query {
        vehicle: VehicleSelector::vehicle("car"),
        start: Some(date(2024, 1, 1)),
        end: Some(date(2024, 1, 31)),
        ..Default::default()
    };

    let report = run(&config, &batch(), &query, date(2024, 6, 1)).unwrap();
    assert_eq!(report.summary.fill_up_count, 2);
    assert_eq!(report.vehicle_labels.values().next().map(String::as_str), Some("Golf"));
    assert!(report.imperial.is_some());

    let json: serde_json::Value = serde_json::from_str(&render(&report, true).unwrap()).unwrap();
    assert_eq!(json["summary"]["totalDistance"], 500);
    assert_eq!(json["selection"]["vehicle"], "car");
}

#[test]
fn unknown_vehicle_is_a_selection_error() {
    let query = Query {
        vehicle: VehicleSelector::vehicle("boat"),
        ..Default::default()
    };
    let err = run(&ReportConfig::default(), &batch(), &query, date(2024, 2, 20)).unwrap_err();
    assert!(matches!(err, ReportError::Selection(_)));
}

#[test]
fn brand_filter_applies() {
    let query = Query {
        start: Some(date(2024, 1, 1)),
        end: Some(date(2024, 12, 31)),
        brand: Some("BP".to_string()),
        ..Default::default()
    };
    let report = run(&ReportConfig::default(), &batch(), &query, date(2024, 12, 31)).unwrap();
    assert_eq!(report.summary.fill_up_count, 1);
    assert_eq!(report.consumption.len(), 1);
    assert_eq!(report.consumption[0].distance, 700);
}

#[test]
fn year_to_date_starts_on_january_first() {
    let query = Query {
        year_to_date: true,
        ..Default::default()
    };
    let selection = query.selection(date(2024, 2, 20), 30).unwrap();
    assert_eq!(selection.range.start, date(2024, 1, 1));
    assert_eq!(selection.range.end, date(2024, 2, 20));

    let report = run(&ReportConfig::default(), &batch(), &query, date(2024, 2, 20)).unwrap();
    assert_eq!(report.summary.fill_up_count, 3);
}

#[test]
fn whole_year_gives_monthly_groups() {
    let query = Query {
        year: Some(2024),
        ..Default::default()
    };
    let selection = query.selection(date(2026, 5, 1), 30).unwrap();
    assert_eq!(selection.range.start, date(2024, 1, 1));
    assert_eq!(selection.range.end, date(2024, 12, 31));

    let report = run(&ReportConfig::default(), &batch(), &query, date(2026, 5, 1)).unwrap();
    let months: Vec<String> = report.by_month.iter().map(|g| g.key.to_string()).collect();
    assert_eq!(months, ["2024-01", "2024-02"]);
    assert!(matches!(report.by_month[0].key, GroupKey::Month { .. }));
}

#[test]
fn out_of_range_year_is_rejected() {
    let query = Query {
        year: Some(i32::MAX),
        ..Default::default()
    };
    assert!(matches!(
        query.selection(date(2024, 1, 1), 30),
        Err(ReportError::InvalidYear(_))
    ));
}

#[test]
fn vehicle_found_in_data_without_directory() {
    let query = Query {
        vehicle: VehicleSelector::vehicle("car"),
        year: Some(2024),
        ..Default::default()
    };
    let report = run(&ReportConfig::default(), &batch(), &query, date(2024, 12, 31)).unwrap();
    assert_eq!(report.summary.fill_up_count, 3);
}

#[test]
fn malformed_elements_are_reported_not_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "a", "vehicleId": "car", "date": "2024-01-01",
              "odometerReading": 10000, "liters": 40, "totalAmount": 72}},
            null,
            {{"id": "b", "vehicleId": "car", "date": "2024-01-15",
              "odometerReading": 10500, "liters": 38, "totalAmount": 68.4, "fuelGrade": 95}},
            {{"id": "c", "vehicleId": "car", "date": "2024-01-20", "liters": 1e400}},
            {{"id": "d", "vehicleId": "car", "date": "2024-01-25",
              "odometerReading": 10900, "liters": "n/a", "totalAmount": 20}}
        ]"#
    )
    .unwrap();

    let query = Query {
        year: Some(2024),
        ..Default::default()
    };
    let source = JsonFileSource::new(file.path());
    let report = run(&ReportConfig::default(), &source, &query, date(2024, 12, 31)).unwrap();

    assert_eq!(report.summary.fill_up_count, 2);
    assert_eq!(report.consumption.len(), 1);
    let positions: Vec<usize> = report.rejected.iter().map(|r| r.position).collect();
    assert_eq!(positions, [1, 3, 4]);
    assert_eq!(report.rejected[2].id.as_deref(), Some("d"));
    assert_eq!(report.per_fill[1].fill_up_id.as_str(), "b");
}
