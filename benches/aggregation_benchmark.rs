/// Benchmarks for the view pipeline: hourly aggregation and visibility
/// filtering over a full day of half-hour buckets.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use salesdash::types::{DayVisibility, TimeRecord, ViewMode, Weekday};
use salesdash::utils::{aggregate, filter_visible};

/// A day of half-hour buckets with every weekday filled in
fn full_day() -> Vec<TimeRecord> {
    (0..48)
        .map(|i| {
            let mut record = TimeRecord::new(format!("{:02}:{:02}", i / 2, (i % 2) * 30));
            for day in Weekday::ALL {
                record.set(day, Some((i * (day.index() + 1)) as f64 * 1.5));
            }
            record
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let data = full_day();

    let mut group = c.benchmark_group("aggregate");
    group.bench_function("half_hourly", |b| {
        b.iter(|| aggregate(black_box(&data), ViewMode::HalfHourly))
    });
    group.bench_function("hourly", |b| {
        b.iter(|| aggregate(black_box(&data), ViewMode::Hourly))
    });
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let data = full_day();
    let all = DayVisibility::default();
    let weekend = DayVisibility::from_visible(&[Weekday::Saturday, Weekday::Sunday]);

    let mut group = c.benchmark_group("filter_visible");
    group.bench_function("all_days", |b| {
        b.iter(|| filter_visible(black_box(&data), &all))
    });
    group.bench_function("weekend", |b| {
        b.iter(|| filter_visible(black_box(&data), &weekend))
    });
    group.bench_function("hourly_pipeline", |b| {
        b.iter(|| filter_visible(&aggregate(black_box(&data), ViewMode::Hourly), &all))
    });
    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_filter);
criterion_main!(benches);
