use eframe::App as EApp;
use egui::TextureHandle;
use log::{debug, error, info};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::DashboardConfig;
use crate::data::{fetch_records, DataSource, LoadState};
use crate::error::Result;
use crate::plotting::{ChartRenderer, RenderedChart};
use crate::types::{DayVisibility, DisplayRecord, TimeRecord, ViewMode, Weekday};
use crate::utils::{aggregate, filter_visible};

/// Main application state.
///
/// Every mutation goes through a method that recomputes the display rows
/// before returning, so readers never observe stale derived data.
pub struct App {
    pub config: DashboardConfig,
    load_state: LoadState,
    visibility: DayVisibility,
    view_mode: ViewMode,
    display: Vec<DisplayRecord>,
    renderer: ChartRenderer,
    chart: Option<Arc<RenderedChart>>,
    pub chart_texture: Option<TextureHandle>,
    /// Set whenever the display rows change and the chart must be redrawn
    pub update_needed: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: DashboardConfig) -> Self {
        let renderer = ChartRenderer::new(config.chart_width, config.chart_height);
        Self {
            config,
            load_state: LoadState::Loading,
            visibility: DayVisibility::default(),
            view_mode: ViewMode::default(),
            display: Vec::new(),
            renderer,
            chart: None,
            chart_texture: None,
            update_needed: false,
            status_message: None,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.load_state, LoadState::Ready(_))
    }

    pub fn raw_records(&self) -> &[TimeRecord] {
        self.load_state.records()
    }

    pub fn visibility(&self) -> DayVisibility {
        self.visibility
    }

    pub fn visible_days(&self) -> Vec<Weekday> {
        self.visibility.visible_days()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Rows for the chart: aggregated for the current mode, projected onto
    /// the visible days
    pub fn display_records(&self) -> &[DisplayRecord] {
        &self.display
    }

    /// Flip one day's checkbox. Hiding the last visible day is refused.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        if !self.visibility.toggle(day) {
            debug!("Refusing to hide {}, it is the last visible day", day);
            return false;
        }
        let shown = self.visibility.is_visible(day);
        debug!("{} is now {}", day, if shown { "shown" } else { "hidden" });
        self.recompute();
        true
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
        debug!("Switched to {:?} view", self.view_mode);
        self.recompute();
    }

    /// Settle the initial load with the fetch outcome
    pub fn finish_loading(&mut self, result: Result<Vec<TimeRecord>>) {
        if self.load_state.resolve(result) {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let aggregated = aggregate(self.load_state.records(), self.view_mode);
        self.display = filter_visible(&aggregated, &self.visibility);
        self.update_needed = true;
    }

    /// Draw the current view, reusing a cached image when possible
    pub fn render_chart(&mut self) -> Result<Arc<RenderedChart>> {
        let visible = self.visible_days();
        let chart = self
            .renderer
            .render(&self.display, &visible, self.view_mode)?;
        self.chart = Some(Arc::clone(&chart));
        Ok(chart)
    }

    /// Write the current chart to the configured export path
    pub fn export_chart(&mut self) -> Result<PathBuf> {
        let chart = match &self.chart {
            Some(chart) => Arc::clone(chart),
            None => self.render_chart()?,
        };
        let path = self.config.export_path.clone();
        chart.save_png(&path)?;
        info!("Exported chart to {}", path.display());
        Ok(path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

/// Fire the one-time data fetch.
///
/// The task only holds a weak reference to the app: if the dashboard is
/// gone by the time the data arrives, the result is dropped. The task
/// resolves to whether the result reached the app.
pub fn spawn_initial_load(
    app: &Arc<Mutex<App>>,
    source: DataSource,
    timeout: Duration,
    ctx: egui::Context,
) -> JoinHandle<bool> {
    let app = Arc::downgrade(app);
    tokio::spawn(async move {
        let result = fetch_records(&source, timeout).await;
        let Some(app) = app.upgrade() else {
            debug!("Dashboard closed before the sales data arrived");
            return false;
        };
        let applied = match app.lock() {
            Ok(mut app) => {
                app.finish_loading(result);
                true
            }
            Err(_) => {
                error!("App state lock poisoned, dropping load result");
                false
            }
        };
        ctx.request_repaint();
        applied
    })
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx);
        } else {
            error!("Failed to acquire app lock in update");
        }
    }
}
