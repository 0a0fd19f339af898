//! Sales Dashboard
//!
//! A GUI application for browsing half-hourly sales by weekday.

use anyhow::Context;
use eframe::egui;
use log::{error, info};
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

use salesdash::app::{spawn_initial_load, App, AppWrapper};
use salesdash::config::DashboardConfig;
use salesdash::data::DataSource;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load().context("could not load configuration")?;
    info!("Sales data source: {}", config.data_source);

    // Keep the runtime entered so UI code can spawn the data fetch
    let rt = Runtime::new().context("could not start the async runtime")?;
    let _guard = rt.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Sales Dashboard"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |cc| {
            let source = DataSource::parse(&config.data_source);
            let timeout = config.request_timeout();
            let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::new(config)));
            spawn_initial_load(&app, source, timeout, cc.egui_ctx.clone());
            Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
        }),
    ) {
        error!("Error running application: {}", e);
        anyhow::bail!("application exited with an error: {}", e);
    }
    Ok(())
}
