use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuel_stats::{
    DateRange, FillUp, NormalizedFillUps, RawFillUp, Selection, StatsEngine, VehicleDirectory,
    VehicleSelector,
};

fn history(vehicles: usize, fills_per_vehicle: usize) -> Vec<FillUp> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
    let brands = ["Shell", "BP", "Aral", "Esso"];
    (0..vehicles)
        .flat_map(|v| {
            (0..fills_per_vehicle).map(move |i| {
                let date = start + Days::new((i * 7 + v) as u64);
                let liters = 30.0 + ((i * 13 + v) % 20) as f64;
                FillUp::new(
                    format!("v{}-f{}", v, i),
                    format!("vehicle-{}", v),
                    date,
                    10_000 + (i as u64) * 450,
                    liters,
                    liters * 1.75,
                )
                .with_brand(brands[(i + v) % brands.len()])
            })
        })
        .collect()
}

fn bench_report(c: &mut Criterion) {
    let fills = history(10, 500);
    let raw: Vec<RawFillUp> = fills.iter().cloned().map(RawFillUp::from).collect();
    let normalized = NormalizedFillUps::from_fill_ups(fills);
    let engine = StatsEngine::new(VehicleDirectory::new());
    let selection = Selection::new(
        VehicleSelector::All,
        DateRange::new(
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap_or_default(),
        ),
    );

    c.bench_function("report_raw_5000", |b| {
        b.iter(|| engine.report(black_box(&raw), black_box(&selection)))
    });
    c.bench_function("report_normalized_5000", |b| {
        b.iter(|| engine.report_normalized(black_box(&normalized), black_box(&selection)))
    });
}

criterion_group!(benches, bench_report);
criterion_main!(benches);
