use eframe::App;
use eframe::egui::{self, CentralPanel, SidePanel, TopBottomPanel};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::constants::layout::PRICE_PANEL_WIDTH;
use crate::data::DataSource;
use crate::error::{PriceRangeError, Result};
use crate::perf::FrameTimer;
use crate::state::AppState;
use crate::ui;

pub struct PriceRange {
    pub state: AppState,
    frame_timer: FrameTimer,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl PriceRange {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            frame_timer: FrameTimer::new(),
        }
    }

    /// Load a CSV or Parquet file and point the selector at its price column
    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        let data_source = DataSource::load(&path)?;
        self.state.ui.clear_error();
        self.state.set_data(data_source)
    }

    /// Log an error and show it in the banner
    pub fn report(&mut self, err: PriceRangeError) {
        log::warn!("{}: {}", err.title(), err);
        self.state.ui.set_error(err.title(), err.user_message());
    }

    pub fn save_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(crate::constants::config::CONFIG_FILE)
            .save_file()
        {
            if let Err(e) = self.state.config.save(&path) {
                self.report(e);
            }
        }
    }

    pub fn load_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let result = AppConfig::load(&path).and_then(|config| self.state.apply_config(config));
            if let Err(e) = result {
                self.report(e);
            }
        }
    }

    /// Copy the selected table rows to the clipboard as TSV
    pub fn copy_selected_rows(&mut self) {
        let rows = self.state.ui.table.sorted_selection();
        let Some(ds) = self.state.data.as_ref() else {
            return;
        };
        if rows.is_empty() {
            return;
        }

        let text = ui::rows_as_tsv(ds, &rows);
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        match result {
            Ok(()) => log::debug!("Copied {} rows to the clipboard", rows.len()),
            Err(e) => self.report(e.into()),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            if let Err(e) = self.load_file(path) {
                self.report(e);
            }
        }
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(name) = self.state.current_file.as_ref().and_then(|f| f.file_name()) {
                ui.label(format!("📁 {}", name.to_string_lossy()));
                ui.separator();
            }
            let rows = self.state.row_count();
            ui.label(format!("Rows: {}", rows));
            if self.state.filter.is_active() {
                ui.separator();
                ui.label(format!("In range: {}", self.state.ui.table.display_indices.len()));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("{:.0} fps", self.frame_timer.fps()));
            });
        });
    }

    fn render_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.state.ui.error.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Frame::new()
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, format!("⚠ {}", banner.title));
                    ui.label(&banner.message);
                    if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.state.ui.clear_error();
        }
        ui.add_space(4.0);
    }
}

impl App for PriceRange {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame_timer.begin_frame();

        // Set theme
        if self.state.config.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Handle keyboard shortcuts
        ctx.input(|i| {
            if i.key_pressed(egui::Key::T) {
                self.state.config.dark_mode = !self.state.config.dark_mode;
            }
            if i.key_pressed(egui::Key::F1) {
                self.state.ui.show_help = !self.state.ui.show_help;
            }
            if i.key_pressed(egui::Key::Escape) {
                self.state.ui.show_help = false;
            }
        });

        self.handle_dropped_files(ctx);

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::render_toolbar(self, ui);
        });

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        if self.state.has_data() {
            SidePanel::left("price_panel")
                .resizable(false)
                .exact_width(PRICE_PANEL_WIDTH)
                .show(ctx, |ui| {
                    ui::render_price_panel(self, ui);
                });
        }

        // Selection changes made this frame reach the filter before the table draws
        self.state.apply_selector_changes();

        CentralPanel::default().show(ctx, |ui| {
            self.render_error_banner(ui);
            if self.state.has_data() {
                ui::render_data_table(self, ui);
            } else {
                ui.vertical_centered(|ui| {
                    ui.heading("No data loaded");
                    ui.label("Open a CSV or Parquet file, or drop one here, to get started");
                });
            }
        });

        ui::render_help_dialog(self, ctx);
    }
}
