use crate::app::PriceRange;
use eframe::egui::{self, ComboBox};

/// Render the top toolbar: file handling, config and display toggles
pub fn render_toolbar(app: &mut PriceRange, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("📂").on_hover_text("Open Data File").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Data Files", &["csv", "parquet"])
                .pick_file()
            {
                if let Err(e) = app.load_file(path) {
                    app.report(e);
                }
            }
        }

        if !app.state.recent_files.is_empty() {
            let mut picked = None;
            ComboBox::from_id_salt("recent_files")
                .selected_text("📋")
                .show_ui(ui, |ui| {
                    ui.label("Recent Files:");
                    ui.separator();
                    for path in &app.state.recent_files {
                        if let Some(name) = path.file_name() {
                            if ui
                                .button(name.to_string_lossy())
                                .on_hover_text(path.display().to_string())
                                .clicked()
                            {
                                picked = Some(path.clone());
                            }
                        }
                    }
                });
            if let Some(path) = picked {
                if let Err(e) = app.load_file(path) {
                    app.report(e);
                }
            }
        }

        if let Some(file) = &app.state.current_file {
            ui.label(format!(
                "📄 {}",
                file.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("Unknown")
            ))
            .on_hover_text(file.display().to_string());
        }

        ui.separator();

        if ui.button("⚙").on_hover_text("Save Config").clicked() {
            app.save_config();
        }
        if ui.button("📥").on_hover_text("Load Config").clicked() {
            app.load_config();
        }

        ui.separator();

        let dark = app.state.config.dark_mode;
        if ui
            .button(if dark { "🌙" } else { "☀" })
            .on_hover_text("Toggle theme (T)")
            .clicked()
        {
            app.state.config.dark_mode = !dark;
        }
        if ui.button("❓").on_hover_text("Help (F1)").clicked() {
            app.state.ui.show_help = !app.state.ui.show_help;
        }
    });
}
