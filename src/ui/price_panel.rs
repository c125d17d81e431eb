use crate::app::PriceRange;
use crate::constants::layout::HISTOGRAM_HEIGHT;
use crate::widgets::{format_value, DoubleRangeSlider};
use eframe::egui::{self, ComboBox};
use egui_plot::{Bar, BarChart, Plot};

/// Render the price column picker, range slider, summary and histogram
pub fn render_price_panel(app: &mut PriceRange, ui: &mut egui::Ui) {
    profiling::scope!("render_price_panel");

    let state = &mut app.state;
    let Some(ds) = state.data.as_ref() else {
        ui.vertical_centered(|ui| {
            ui.label("Open a CSV or Parquet file to filter by price");
        });
        return;
    };

    // Column picker (numeric columns only)
    let names = ds.column_names();
    let numeric = ds.numeric_columns();
    let mut picked = state.filter.column;
    let selected_text = picked
        .and_then(|c| names.get(c))
        .map(|s| s.as_str())
        .unwrap_or("Pick a column");
    ComboBox::from_label("Price column")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for &idx in &numeric {
                ui.selectable_value(&mut picked, Some(idx), &names[idx]);
            }
        });

    if picked != state.filter.column {
        if let Some(column) = picked {
            if let Err(e) = state.select_price_column(column) {
                app.report(e);
                return;
            }
        }
    }

    ui.separator();

    let style = state.config.style.clone();
    let Some(selector) = state.selector.as_mut() else {
        ui.label("This column cannot drive a price range");
        return;
    };

    ui.add_space(4.0);
    let response = ui.add(
        DoubleRangeSlider::new(selector)
            .style(&style)
            .id_salt("price_slider"),
    );
    // Histogram follows what the filter was told, not in-flight values
    let selection = selector.last_notified();
    response.on_hover_text(format!(
        "Drag a handle, or hover and use ← → (step {})",
        format_value(selector.options().step)
    ));
    ui.weak(format!(
        "Column spans {} to {}",
        format_value(selector.domain().min()),
        format_value(selector.domain().max())
    ));

    let mut reset_clicked = false;
    ui.horizontal(|ui| {
        reset_clicked = ui
            .button("Reset")
            .on_hover_text("Select the full price range")
            .clicked();
        if !selector.is_full_range() {
            ui.weak("filtered");
        }
    });
    if reset_clicked {
        state.reset_range();
    }

    ui.separator();

    if let Some(summary) = state.summary {
        egui::Grid::new("price_summary")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Count");
                ui.label(summary.count.to_string());
                ui.end_row();
                ui.label("Min");
                ui.label(format_value(summary.min));
                ui.end_row();
                ui.label("Max");
                ui.label(format_value(summary.max));
                ui.end_row();
                ui.label("Mean");
                ui.label(format!("{:.2}", summary.mean));
                ui.end_row();
                ui.label("Median");
                ui.label(format_value(summary.median));
                ui.end_row();
            });
    }

    if state.histogram.is_empty() {
        return;
    }

    let range_color = style.range_color32().unwrap_or(egui::Color32::GRAY);
    let idle_color = ui.visuals().weak_text_color();
    let (inside, outside): (Vec<_>, Vec<_>) = state
        .histogram
        .iter()
        .partition(|bin| bin.overlaps(selection));
    let to_bars = |bins: Vec<&crate::data::HistogramBin>| -> Vec<Bar> {
        bins.into_iter()
            .map(|bin| Bar::new(bin.center(), f64::from(bin.count)).width(bin.width()))
            .collect()
    };
    let inside = to_bars(inside);
    let outside = to_bars(outside);

    ui.add_space(6.0);
    Plot::new("price_histogram")
        .height(HISTOGRAM_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("In range", inside).color(range_color));
            plot_ui.bar_chart(BarChart::new("Out of range", outside).color(idle_color));
        });
}
