use crate::app::PriceRange;

pub fn render_help_dialog(app: &mut PriceRange, ctx: &eframe::egui::Context) {
    if app.state.ui.show_help {
        eframe::egui::Window::new("⌨ Keyboard Shortcuts")
            .anchor(eframe::egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading("Price Slider");
                ui.label("Drag - Move the nearest handle");
                ui.label("Click track - Jump the nearest handle there");
                ui.label("← / → - Nudge the last used handle by one step");

                ui.separator();
                ui.heading("Table");
                ui.label("Click header - Sort (again to reverse)");
                ui.label("Click row - Toggle selection");
                ui.label("Ctrl/Cmd + C - Copy selected rows");

                ui.separator();
                ui.heading("General");
                ui.label("T - Toggle dark/light theme");
                ui.label("F1 - Toggle help");
                ui.label("ESC - Close help");
                ui.label("Drop a CSV or Parquet file to open it");

                ui.separator();
                if ui.button("Close").clicked() {
                    app.state.ui.show_help = false;
                }
            });
    }
}
