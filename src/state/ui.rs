//! UI interaction state

use std::collections::HashSet;

use super::filters::PriceFilter;

/// Error shown in the banner above the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub title: String,
    pub message: String,
}

/// Table state with pre-computed filter/sort indices
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// Pre-computed row indices after filtering AND sorting
    pub display_indices: Vec<usize>,
    /// Currently selected rows
    pub selected_rows: HashSet<usize>,
    /// Price column and range the indices were computed for
    filter_cache_key: PriceFilter,
    /// Last sort config (column, ascending)
    sort_cache_key: (Option<usize>, bool),
    /// Data version the indices belong to
    data_version: u64,
}

impl TableState {
    /// Check if cache is valid for current filter/sort/data
    pub fn is_cache_valid(
        &self,
        filter: &PriceFilter,
        sort_col: Option<usize>,
        sort_asc: bool,
        data_version: u64,
    ) -> bool {
        self.filter_cache_key == *filter
            && self.sort_cache_key == (sort_col, sort_asc)
            && self.data_version == data_version
    }

    /// Update cache keys after recomputation
    pub fn update_cache_keys(
        &mut self,
        filter: &PriceFilter,
        sort_col: Option<usize>,
        sort_asc: bool,
        data_version: u64,
    ) {
        self.filter_cache_key = filter.clone();
        self.sort_cache_key = (sort_col, sort_asc);
        self.data_version = data_version;
    }

    /// Invalidate cache (forces recomputation)
    pub fn invalidate(&mut self) {
        self.data_version = 0;
        self.display_indices.clear();
        self.selected_rows.clear();
    }

    /// Toggle row selection
    pub fn toggle_selection(&mut self, row: usize) {
        if !self.selected_rows.remove(&row) {
            self.selected_rows.insert(row);
        }
    }

    /// Check if row is selected
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected_rows.contains(&row)
    }

    /// Selected rows in ascending order
    pub fn sorted_selection(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.selected_rows.iter().copied().collect();
        rows.sort_unstable();
        rows
    }
}

/// UI state manages table interaction, sorting, and dialogs
#[derive(Debug, Clone)]
pub struct UiState {
    /// Column to sort by in data table
    pub sort_column: Option<usize>,

    /// Sort direction (true = ascending, false = descending)
    pub sort_ascending: bool,

    /// Error to display in UI
    pub error: Option<ErrorBanner>,

    /// Whether the help window is open
    pub show_help: bool,

    /// Table state with pre-computed indices
    pub table: TableState,

    /// Data version counter (increments on load)
    pub data_version: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sort_column: None,
            sort_ascending: true,
            error: None,
            show_help: false,
            table: TableState::default(),
            data_version: 0,
        }
    }
}

impl UiState {
    /// Increment data version (call after loading new data)
    pub fn on_data_loaded(&mut self) {
        self.data_version += 1;
        self.table.invalidate();
        self.clear_sort();
    }

    /// Clear the sort configuration
    pub fn clear_sort(&mut self) {
        self.sort_column = None;
        self.sort_ascending = true;
    }

    /// Toggle sort direction for a column
    pub fn toggle_sort(&mut self, column: usize) {
        if self.sort_column == Some(column) {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = Some(column);
            self.sort_ascending = true;
        }
    }

    /// Set an error for the banner
    pub fn set_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.error = Some(ErrorBanner {
            title: title.into(),
            message: message.into(),
        });
    }

    /// Clear the current error
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Interval;

    #[test]
    fn test_toggle_sort_cycles_direction() {
        let mut ui = UiState::default();
        ui.toggle_sort(2);
        assert_eq!((ui.sort_column, ui.sort_ascending), (Some(2), true));
        ui.toggle_sort(2);
        assert_eq!((ui.sort_column, ui.sort_ascending), (Some(2), false));
        ui.toggle_sort(0);
        assert_eq!((ui.sort_column, ui.sort_ascending), (Some(0), true));
    }

    #[test]
    fn test_cache_keys_track_filter_and_data() {
        let mut table = TableState::default();
        let mut filter = PriceFilter::new();
        filter.select_column(1);
        filter.set_range(Interval::new(1.0, 2.0));
        table.update_cache_keys(&filter, None, true, 1);
        assert!(table.is_cache_valid(&filter, None, true, 1));
        assert!(!table.is_cache_valid(&filter, Some(0), true, 1));
        assert!(!table.is_cache_valid(&filter, None, true, 2));

        let mut wider = filter.clone();
        wider.set_range(Interval::new(1.0, 3.0));
        assert!(!table.is_cache_valid(&wider, None, true, 1));

        // Same interval reported for another column
        let mut other_column = PriceFilter::new();
        other_column.select_column(2);
        other_column.set_range(Interval::new(1.0, 2.0));
        assert!(!table.is_cache_valid(&other_column, None, true, 1));
    }

    #[test]
    fn test_data_load_resets_table() {
        let mut ui = UiState::default();
        ui.table.toggle_selection(4);
        ui.table.toggle_selection(1);
        assert_eq!(ui.table.sorted_selection(), vec![1, 4]);
        ui.table.toggle_selection(4);
        assert!(!ui.table.is_selected(4));

        ui.toggle_sort(1);
        ui.on_data_loaded();
        assert_eq!(ui.data_version, 1);
        assert!(ui.table.selected_rows.is_empty());
        assert!(ui.sort_column.is_none());
    }

    #[test]
    fn test_error_banner() {
        let mut ui = UiState::default();
        ui.set_error("File Error", "missing");
        assert_eq!(ui.error.as_ref().map(|e| e.title.as_str()), Some("File Error"));
        ui.clear_error();
        assert!(ui.error.is_none());
    }
}
