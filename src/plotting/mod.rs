mod chart;
mod styles;

pub use chart::{build_series, value_range, ChartRenderer, ChartSeries, RenderedChart};
pub use styles::{series_color, ChartStyle, ChartTheme};

#[cfg(test)]
mod tests;
