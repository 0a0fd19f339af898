use super::chart::{format_x_label, format_y_label, PlotCacheKey};
use super::*;
use crate::types::{DisplayRecord, ViewMode, Weekday};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn display(rows: &[(&str, &[(Weekday, f64)])]) -> Vec<DisplayRecord> {
    rows.iter()
        .map(|(time, values)| DisplayRecord {
            time: time.to_string(),
            values: values.iter().copied().collect(),
        })
        .collect()
}

#[test]
fn test_build_series_skips_missing_values() {
    let data = display(&[
        ("08:00", &[(Weekday::Monday, 10.0), (Weekday::Friday, 1.0)]),
        ("08:30", &[(Weekday::Friday, 2.0)]),
        ("09:00", &[(Weekday::Monday, 4.0)]),
    ]);

    let series = build_series(&data, &[Weekday::Monday, Weekday::Friday]);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].day, Weekday::Monday);
    assert_eq!(series[0].points, vec![(0.0, 10.0), (2.0, 4.0)]);
    assert_eq!(series[1].points, vec![(0.0, 1.0), (1.0, 2.0)]);
}

#[test]
fn test_value_range() {
    let series = vec![ChartSeries {
        day: Weekday::Monday,
        points: vec![(0.0, 10.0), (1.0, 50.0)],
    }];
    let (min, max) = value_range(&series);
    assert_eq!(min, 0.0);
    assert!(max > 50.0);
}

#[test]
fn test_value_range_flat_data() {
    assert_eq!(value_range(&[]), (0.0, 1.0));

    let series = vec![ChartSeries {
        day: Weekday::Sunday,
        points: vec![(0.0, 0.0), (1.0, 0.0)],
    }];
    assert_eq!(value_range(&series), (0.0, 1.0));
}

#[test]
fn test_x_labels_are_thinned() {
    let labels: Vec<String> = (0..48)
        .map(|i| format!("{:02}:{:02}", i / 2, (i % 2) * 30))
        .collect();

    assert_eq!(format_x_label(&labels, 0.0, 16), "00:00");
    assert_eq!(format_x_label(&labels, 3.0, 16), "01:30");
    assert_eq!(format_x_label(&labels, 1.0, 16), "");
    assert_eq!(format_x_label(&labels, 0.5, 16), "");
    assert_eq!(format_x_label(&labels, 48.0, 16), "");
    assert_eq!(format_x_label(&labels, -1.0, 16), "");
}

#[test]
fn test_y_labels() {
    assert_eq!(format_y_label(950.0), "950");
    assert_eq!(format_y_label(12_500.0), "12.5K");
    assert_eq!(format_y_label(3_200_000.0), "3.2M");
}

#[test]
fn test_cache_key_tracks_view_state() {
    let data = display(&[("08:00", &[(Weekday::Monday, 10.0)])]);
    let visible = [Weekday::Monday];

    let key = PlotCacheKey::new(&data, &visible, ViewMode::HalfHourly);
    assert!(key == PlotCacheKey::new(&data, &visible, ViewMode::HalfHourly));
    assert!(key != PlotCacheKey::new(&data, &visible, ViewMode::Hourly));
    assert!(key != PlotCacheKey::new(&data, &[Weekday::Tuesday], ViewMode::HalfHourly));

    let changed = display(&[("08:00", &[(Weekday::Monday, 11.0)])]);
    assert!(key != PlotCacheKey::new(&changed, &visible, ViewMode::HalfHourly));
}

#[test]
fn test_save_png_rejects_short_buffer() {
    let temp_dir = TempDir::new().unwrap();
    let chart = RenderedChart {
        width: 4,
        height: 4,
        pixels: vec![0; 5],
    };
    assert!(chart.save_png(&temp_dir.path().join("chart.png")).is_err());
}

#[test]
fn test_save_png() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chart.png");
    let chart = RenderedChart {
        width: 2,
        height: 2,
        pixels: vec![255; 12],
    };

    chart.save_png(&path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

/// Text rendering goes through the system font lookup; machines without a
/// sans-serif face cannot draw the chart at all
fn sans_serif_available() -> bool {
    use plotters::prelude::IntoFont;
    ("sans-serif", 12.0).into_font().box_size("Sales").is_ok()
}

#[test]
fn test_render_and_cache() {
    if !sans_serif_available() {
        eprintln!("skipping test_render_and_cache: no sans-serif font installed");
        return;
    }

    let data = display(&[
        ("08:00", &[(Weekday::Monday, 10.0), (Weekday::Tuesday, 20.0)]),
        ("08:30", &[(Weekday::Monday, 5.0), (Weekday::Tuesday, 0.0)]),
    ]);
    let visible = [Weekday::Monday, Weekday::Tuesday];
    let mut renderer = ChartRenderer::new(320, 200);

    let first = renderer.render(&data, &visible, ViewMode::HalfHourly).unwrap();
    assert_eq!(first.pixels.len(), 320 * 200 * 3);
    // top-left corner is theme background
    assert_eq!(&first.pixels[..3], &[24, 24, 27]);

    let second = renderer.render(&data, &visible, ViewMode::HalfHourly).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    let hourly = renderer.render(&data, &visible, ViewMode::Hourly).unwrap();
    assert!(!std::sync::Arc::ptr_eq(&first, &hourly));
}
