mod toolbar;
mod price_panel;
mod data_table;
mod help_dialog;

pub use toolbar::render_toolbar;
pub use price_panel::render_price_panel;
pub use data_table::{render_data_table, rows_as_tsv};
pub use help_dialog::render_help_dialog;
