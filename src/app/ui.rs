use egui::{Checkbox, Color32, Context, RichText};
use log::error;

use super::App;
use crate::data::LoadState;
use crate::types::Weekday;

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    let ready = app.is_ready();

    egui::TopBottomPanel::top("controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Sales Dashboard");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(ready, egui::Button::new("Export PNG"))
                    .clicked()
                {
                    app.status_message = Some(match app.export_chart() {
                        Ok(path) => format!("Saved {}", path.display()),
                        Err(e) => format!("Export failed: {}", e),
                    });
                }
                if ui
                    .add_enabled(ready, egui::Button::new(app.view_mode().switch_label()))
                    .clicked()
                {
                    app.toggle_view_mode();
                }
            });
        });

        ui.separator();

        // Day toggles
        ui.horizontal_wrapped(|ui| {
            let visibility = app.visibility();
            for day in Weekday::ALL {
                let mut checked = visibility.is_visible(day);
                let (r, g, b) = day.color();
                let label = RichText::new(day.name()).color(Color32::from_rgb(r, g, b));
                if ui
                    .add_enabled(ready, Checkbox::new(&mut checked, label))
                    .changed()
                {
                    app.toggle_day(day);
                }
            }
        });

        if let Some(message) = &app.status_message {
            ui.label(message);
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| match app.load_state() {
        LoadState::Loading => {
            ui.centered_and_justified(|ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            });
        }
        LoadState::Failed(message) => {
            ui.colored_label(Color32::from_rgb(0xFF, 0x6B, 0x6B), format!("Error: {}", message));
        }
        LoadState::Ready(_) if !app.visibility().any_visible() => {
            ui.label("No data to display. Select at least one day.");
        }
        LoadState::Ready(_) => {
            if let Some(texture) = &app.chart_texture {
                ui.add(
                    egui::Image::new(texture)
                        .max_width(ui.available_width())
                        .maintain_aspect_ratio(true),
                );
            }
        }
    });

    // Update chart if needed
    if app.update_needed && ready {
        match app.render_chart() {
            Ok(chart) => {
                let image = egui::ColorImage::from_rgb(
                    [chart.width as usize, chart.height as usize],
                    &chart.pixels,
                );
                app.chart_texture =
                    Some(ctx.load_texture("sales_chart", image, egui::TextureOptions::LINEAR));
                ctx.request_repaint();
            }
            Err(e) => {
                error!("Plotting error: {}", e);
                app.status_message = Some(e.to_string());
            }
        }
        app.update_needed = false;
    }
}
