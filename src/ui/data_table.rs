use crate::app::PriceRange;
use crate::constants::layout::{TABLE_HEADER_HEIGHT, TABLE_ROW_HEIGHT};
use crate::data::DataSource;
use crate::state::AppState;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

/// Recompute filtered and sorted row indices
pub fn recompute_indices(state: &mut AppState) {
    profiling::scope!("recompute_table_indices");

    let ds = match &state.data {
        Some(ds) => ds,
        None => return,
    };

    let total_rows = ds.height();

    // Phase 1: Filter by price range
    let mut rows: Vec<usize> = match (state.filter.column, state.filter.range) {
        (Some(column), Some(range)) => ds.rows_in_interval(column, range).unwrap_or_else(|e| {
            log::warn!("Price filter skipped: {}", e);
            (0..total_rows).collect()
        }),
        _ => (0..total_rows).collect(),
    };

    // Phase 2: Sort
    if let Some(sort_col) = state.ui.sort_column {
        if let Ok(sort_data) = ds.get_cached_column(sort_col) {
            let ascending = state.ui.sort_ascending;
            rows.sort_by(|&a, &b| {
                let va = sort_data.get(a).copied().unwrap_or(f64::NAN);
                let vb = sort_data.get(b).copied().unwrap_or(f64::NAN);

                // Handle NaN: push to end
                match (va.is_nan(), vb.is_nan()) {
                    (true, true) => std::cmp::Ordering::Equal,
                    (true, false) => std::cmp::Ordering::Greater,
                    (false, true) => std::cmp::Ordering::Less,
                    (false, false) => {
                        let cmp = va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal);
                        if ascending { cmp } else { cmp.reverse() }
                    }
                }
            });
        }
    }

    log::debug!("Table shows {} of {} rows", rows.len(), total_rows);
    state.ui.table.display_indices = rows;
    state.ui.table.update_cache_keys(
        &state.filter,
        state.ui.sort_column,
        state.ui.sort_ascending,
        state.ui.data_version,
    );
}

/// Selected rows as tab-separated text with a header line
pub fn rows_as_tsv(ds: &DataSource, rows: &[usize]) -> String {
    let mut output = ds.column_names().join("\t");
    output.push('\n');

    let columns: Vec<Vec<String>> = (0..ds.width())
        .map(|col| ds.column_as_string(col).unwrap_or_default())
        .collect();

    for &row_idx in rows {
        let cells: Vec<&str> = columns
            .iter()
            .map(|col| col.get(row_idx).map(|s| s.as_str()).unwrap_or(""))
            .collect();
        output.push_str(&cells.join("\t"));
        output.push('\n');
    }
    output
}

/// Render the filtered data table
pub fn render_data_table(app: &mut PriceRange, ui: &mut egui::Ui) {
    profiling::scope!("render_data_table");

    let state = &mut app.state;
    let Some(total_rows) = state.data.as_ref().map(|ds| ds.height()) else {
        return;
    };

    if !state.ui.table.is_cache_valid(
        &state.filter,
        state.ui.sort_column,
        state.ui.sort_ascending,
        state.ui.data_version,
    ) {
        recompute_indices(state);
    }

    let headers = state.column_names();
    let shown = state.ui.table.display_indices.len();
    let selected_count = state.ui.table.selected_rows.len();
    let mut copy_requested = false;

    ui.horizontal(|ui| {
        if shown < total_rows {
            ui.label(format!("Showing {} of {} rows", shown, total_rows));
        } else {
            ui.label(format!("{} rows", total_rows));
        }
        if selected_count > 0 {
            ui.separator();
            ui.label(format!("{} selected", selected_count));
            if ui.small_button("Copy").on_hover_text("Copy selected rows (Ctrl+C)").clicked() {
                copy_requested = true;
            }
            if ui.small_button("Clear").clicked() {
                state.ui.table.selected_rows.clear();
            }
        }
    });

    ui.separator();

    let mut sort_clicked = None;
    let mut toggled_row = None;
    {
        let Some(ds) = state.data.as_ref() else {
            return;
        };
        let table = &state.ui.table;
        let price_column = state.filter.column;
        let sort_column = state.ui.sort_column;
        let sort_ascending = state.ui.sort_ascending;

        let columns = ds.cached_strings();

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(45.0).resizable(false))
            .columns(Column::initial(100.0).resizable(true).clip(true), headers.len())
            .sense(egui::Sense::click())
            .header(TABLE_HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for (col_idx, label) in headers.iter().enumerate() {
                    header.col(|ui| {
                        let indicator = match (sort_column == Some(col_idx), sort_ascending) {
                            (true, true) => " ↑",
                            (true, false) => " ↓",
                            _ => "",
                        };
                        let btn = egui::Button::new(
                            egui::RichText::new(format!("{}{}", label, indicator)).strong(),
                        )
                        .frame(false);
                        if ui.add(btn).on_hover_text("Click to sort").clicked() {
                            sort_clicked = Some(col_idx);
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, shown, |mut row| {
                    let Some(&row_idx) = table.display_indices.get(row.index()) else {
                        return;
                    };
                    row.set_selected(table.is_selected(row_idx));

                    row.col(|ui| {
                        ui.label(format!("{}", row_idx + 1));
                    });
                    for col_idx in 0..headers.len() {
                        row.col(|ui| {
                            let cell = columns
                                .get(&col_idx)
                                .and_then(|c| c.get(row_idx))
                                .map(|s| s.as_str())
                                .unwrap_or("");
                            if Some(col_idx) == price_column {
                                ui.strong(cell);
                            } else {
                                ui.label(cell);
                            }
                        });
                    }

                    if row.response().clicked() {
                        toggled_row = Some(row_idx);
                    }
                });
            });
    }

    if let Some(col_idx) = sort_clicked {
        state.ui.toggle_sort(col_idx);
    }
    if let Some(row_idx) = toggled_row {
        state.ui.table.toggle_selection(row_idx);
    }

    if copy_requested || ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::C)) {
        app.copy_selected_rows();
    }
}
