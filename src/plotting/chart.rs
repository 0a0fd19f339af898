use log::debug;
use lru::LruCache;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::error::Error;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use super::styles::{series_color, ChartStyle, ChartTheme};
use crate::error::{DashboardError, Result};
use crate::types::{DisplayRecord, ViewMode, Weekday};

type PlotError = Box<dyn Error + Send + Sync>;

const CACHE_CAPACITY: usize = 16;

/// An RGB chart image ready to be uploaded as a texture or written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB bytes, `width * height * 3` long
    pub pixels: Vec<u8>,
}

impl RenderedChart {
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let image = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| {
                DashboardError::Render("pixel buffer does not match chart size".to_string())
            })?;
        image.save(path)?;
        Ok(())
    }
}

/// The points of one weekday line, x being the bucket index
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub day: Weekday,
    pub points: Vec<(f64, f64)>,
}

/// Build one series per visible day. Buckets without a value for a day
/// leave a gap in that day's line.
pub fn build_series(display: &[DisplayRecord], visible: &[Weekday]) -> Vec<ChartSeries> {
    visible
        .iter()
        .map(|&day| ChartSeries {
            day,
            points: display
                .iter()
                .enumerate()
                .filter_map(|(i, record)| record.get(day).map(|value| (i as f64, value)))
                .collect(),
        })
        .collect()
}

/// Y range covering every point with some headroom. Never empty.
pub fn value_range(series: &[ChartSeries]) -> (f64, f64) {
    let values = series.iter().flat_map(|s| s.points.iter().map(|(_, y)| *y));
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));

    if max - min <= f64::EPSILON {
        return (min, min + 1.0);
    }
    (min * 1.1, max * 1.1)
}

/// Label for the x position `x`, or nothing if `x` is between buckets or
/// thinned out to keep labels from overlapping
pub(super) fn format_x_label(labels: &[String], x: f64, max_labels: usize) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    let idx = idx as usize;
    let step = labels.len().div_ceil(max_labels.max(1)).max(1);
    match labels.get(idx) {
        Some(label) if idx % step == 0 => label.clone(),
        _ => String::new(),
    }
}

pub(super) fn format_y_label(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1_000.0 {
        format!("{:.1}K", y / 1_000.0)
    } else {
        format!("{:.0}", y)
    }
}

#[derive(Hash, Eq, PartialEq)]
pub(super) struct PlotCacheKey {
    mode: ViewMode,
    visible: Vec<Weekday>,
    data_hash: u64,
}

impl PlotCacheKey {
    pub(super) fn new(display: &[DisplayRecord], visible: &[Weekday], mode: ViewMode) -> Self {
        let mut hasher = DefaultHasher::new();
        for record in display {
            record.time.hash(&mut hasher);
            for (day, value) in &record.values {
                day.hash(&mut hasher);
                value.to_bits().hash(&mut hasher);
            }
        }

        Self {
            mode,
            visible: visible.to_vec(),
            data_hash: hasher.finish(),
        }
    }
}

/// Draws the weekday line chart with plotters and remembers recent renders
pub struct ChartRenderer {
    width: u32,
    height: u32,
    theme: ChartTheme,
    style: ChartStyle,
    cache: LruCache<PlotCacheKey, Arc<RenderedChart>>,
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            theme: ChartTheme::default(),
            style: ChartStyle::default(),
            cache: LruCache::new(NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Render the visible series, reusing a cached image when the same view
    /// was drawn recently
    pub fn render(
        &mut self,
        display: &[DisplayRecord],
        visible: &[Weekday],
        mode: ViewMode,
    ) -> Result<Arc<RenderedChart>> {
        let key = PlotCacheKey::new(display, visible, mode);
        if let Some(chart) = self.cache.get(&key) {
            debug!("Chart cache hit ({:?}, {} series)", mode, visible.len());
            return Ok(Arc::clone(chart));
        }

        let mut pixels = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut pixels, (self.width, self.height)).into_drawing_area();
            self.draw(&root, display, visible, mode)
                .map_err(|e| DashboardError::Render(e.to_string()))?;
            root.present()
                .map_err(|e| DashboardError::Render(e.to_string()))?;
        }

        let chart = Arc::new(RenderedChart {
            width: self.width,
            height: self.height,
            pixels,
        });
        self.cache.put(key, Arc::clone(&chart));
        Ok(chart)
    }

    fn draw(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        display: &[DisplayRecord],
        visible: &[Weekday],
        mode: ViewMode,
    ) -> std::result::Result<(), PlotError> {
        let theme = &self.theme;
        let style = &self.style;
        root.fill(&theme.background_color)?;

        let series = build_series(display, visible);
        let (min_val, max_val) = value_range(&series);
        let labels: Vec<String> = display.iter().map(|r| r.time.clone()).collect();
        let x_max = (labels.len() as f64 - 0.5).max(0.5);

        let caption = match mode {
            ViewMode::HalfHourly => "Sales by weekday (half-hourly)",
            ViewMode::Hourly => "Sales by weekday (hourly)",
        };
        let text_font = ("sans-serif", f64::from(style.font_size))
            .into_font()
            .color(&theme.text_color);

        let mut chart = ChartBuilder::on(root)
            .caption(
                caption,
                ("sans-serif", f64::from(style.caption_size))
                    .into_font()
                    .color(&theme.text_color),
            )
            .margin(style.margin)
            .set_all_label_area_size(style.label_area_size)
            .build_cartesian_2d(-0.5f64..x_max, min_val..max_val)?;

        let max_labels = style.max_x_labels;
        let x_label_formatter = |x: &f64| format_x_label(&labels, *x, max_labels);
        let y_label_formatter = |y: &f64| format_y_label(*y);

        chart
            .configure_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(theme.grid_color)
            .axis_style(theme.axis_color)
            .label_style(text_font.clone())
            .x_labels(labels.len().max(1))
            .x_label_formatter(&x_label_formatter)
            .y_label_formatter(&y_label_formatter)
            .x_desc("Time")
            .y_desc("Sales")
            .draw()?;

        for line in &series {
            let color = series_color(line.day);
            chart
                .draw_series(LineSeries::new(
                    line.points.iter().copied(),
                    color.stroke_width(style.line_width),
                ))?
                .label(line.day.name())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

            let marker_size = style.marker_size;
            chart.draw_series(
                line.points
                    .iter()
                    .map(|&point| Circle::new(point, marker_size, color.filled())),
            )?;
        }

        if !series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(theme.background_color)
                .border_style(theme.axis_color)
                .label_font(text_font)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        Ok(())
    }
}
