use plotters::style::{RGBAColor, RGBColor};

use crate::types::Weekday;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(24, 24, 27, 1.0),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub marker_size: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    /// Upper bound on the number of x-axis labels drawn
    pub max_x_labels: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            marker_size: 3,
            font_size: 15,
            caption_size: 24,
            margin: 10,
            label_area_size: 50,
            max_x_labels: 16,
        }
    }
}

/// Line colour for a weekday series
pub fn series_color(day: Weekday) -> RGBColor {
    let (r, g, b) = day.color();
    RGBColor(r, g, b)
}
