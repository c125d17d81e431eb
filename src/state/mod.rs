//! Application state management
//!
//! Groups the loaded data, the price filter, the live range selector and
//! the UI bookkeeping. Everything here is plain data plus the transitions
//! between states; drawing lives in `ui`.

mod filters;
mod ui;

pub use filters::PriceFilter;
pub use ui::UiState;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::config::AppConfig;
use crate::constants::performance::MAX_RECENT_FILES;
use crate::data::{stats, DataSource, HistogramBin, PriceSummary};
use crate::error::{PriceRangeError, Result};
use crate::range::{Interval, RangeSelector};

/// Main application state container
pub struct AppState {
    /// Current data source (CSV or Parquet)
    pub data: Option<DataSource>,

    /// Active price filter
    pub filter: PriceFilter,

    /// Selector over the current price column
    pub selector: Option<RangeSelector>,

    /// Summary of the current price column
    pub summary: Option<PriceSummary>,

    /// Distribution of the current price column
    pub histogram: Vec<HistogramBin>,

    /// UI interaction state
    pub ui: UiState,

    /// Loaded configuration
    pub config: AppConfig,

    /// Currently loaded file path
    pub current_file: Option<PathBuf>,

    /// Recently opened files, most recent first
    pub recent_files: Vec<PathBuf>,

    change_tx: Sender<Interval>,
    change_rx: Receiver<Interval>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let (change_tx, change_rx) = mpsc::channel();
        Self {
            data: None,
            filter: PriceFilter::new(),
            selector: None,
            summary: None,
            histogram: Vec::new(),
            ui: UiState::default(),
            config,
            current_file: None,
            recent_files: Vec::new(),
            change_tx,
            change_rx,
        }
    }

    /// Check if data is loaded
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Get the number of rows in the current dataset
    pub fn row_count(&self) -> usize {
        self.data.as_ref().map(|ds| ds.height()).unwrap_or(0)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .as_ref()
            .map(|ds| ds.column_names())
            .unwrap_or_default()
    }

    /// Install freshly loaded data and pick a price column for it
    pub fn set_data(&mut self, data: DataSource) -> Result<()> {
        let preferred = data
            .find_column(&self.config.price_column)
            .filter(|idx| data.numeric_columns().contains(idx))
            .or_else(|| data.numeric_columns().first().copied());

        if let Some(path) = data.file_path() {
            self.push_recent_file(path.to_path_buf());
            self.current_file = Some(path.to_path_buf());
        }

        self.data = Some(data);
        self.filter.clear();
        self.selector = None;
        self.summary = None;
        self.histogram.clear();
        self.ui.on_data_loaded();

        match preferred {
            Some(column) => self.select_price_column(column),
            None => Err(PriceRangeError::Validation(
                "no numeric column to filter by".to_string(),
            )),
        }
    }

    /// Rebuild the selector, summary and histogram for another column
    pub fn select_price_column(&mut self, column: usize) -> Result<()> {
        let ds = self.data.as_ref().ok_or(PriceRangeError::EmptyDataset)?;

        // A fresh selector starts at the full range, so no stale interval may survive
        self.filter.select_column(column);
        self.filter.clear_range();
        self.selector = None;
        while self.change_rx.try_recv().is_ok() {}

        let (lo, hi) = ds.column_bounds(column)?;
        let values = ds.get_cached_column(column)?;
        self.summary = Some(stats::calculate_summary_vec(&values));

        let (min, max) = (lo.floor(), hi.ceil());
        self.histogram = stats::histogram(&values, min, max, self.config.histogram_bins);
        drop(values);

        let tx = self.change_tx.clone();
        let selector = RangeSelector::with_options(min, max, self.config.selector)?
            .on_change(move |interval| {
                // Only fails once the state (and its receiver) is gone
                let _ = tx.send(interval);
            });
        log::debug!(
            "Price column #{} spans {}..={} ({} bins)",
            column,
            min,
            max,
            self.histogram.len()
        );
        self.selector = Some(selector);
        Ok(())
    }

    /// Apply every interval the selector reported since the last frame
    ///
    /// Returns the number of changes applied.
    pub fn apply_selector_changes(&mut self) -> usize {
        let full = self
            .selector
            .as_ref()
            .map(|s| Interval::new(s.domain().min(), s.domain().max()));
        let mut applied = 0;
        while let Ok(interval) = self.change_rx.try_recv() {
            log::debug!("Price range changed to {}..={}", interval.low, interval.high);
            // The full range filters nothing, rows without a price included
            if Some(interval) == full {
                self.filter.clear_range();
            } else {
                self.filter.set_range(interval);
            }
            applied += 1;
        }
        applied
    }

    /// Put the selector back to the full price range
    pub fn reset_range(&mut self) {
        if let Some(selector) = self.selector.as_mut() {
            selector.reset();
        }
    }

    /// Swap in a new configuration and rebuild the selector with it
    pub fn apply_config(&mut self, config: AppConfig) -> Result<()> {
        self.config = config;
        match self.filter.column {
            Some(column) if self.has_data() => self.select_price_column(column),
            _ => Ok(()),
        }
    }

    /// Add a path to the front of the recent files list
    pub fn push_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample_state() -> AppState {
        let df = df!(
            "name" => ["lamp", "desk", "pen", "chair"],
            "price" => [120.0, 480.5, 2.0, 75.0],
            "stock" => [3i64, 1, 90, 12]
        )
        .unwrap();
        let mut state = AppState::default();
        state.set_data(DataSource::from_dataframe(df, None)).unwrap();
        state
    }

    #[test]
    fn test_set_data_picks_price_column() {
        let state = sample_state();
        assert_eq!(state.filter.column, Some(1));
        let selector = state.selector.as_ref().unwrap();
        assert_eq!(selector.domain().min(), 2.0);
        assert_eq!(selector.domain().max(), 481.0);
        assert_eq!(state.summary.unwrap().count, 4);
        assert_eq!(state.histogram.len(), state.config.histogram_bins);
    }

    #[test]
    fn test_falls_back_to_first_numeric_column() {
        let df = df!("label" => ["a", "b"], "cost" => [1.0, 9.0]).unwrap();
        let mut state = AppState::default();
        state.set_data(DataSource::from_dataframe(df, None)).unwrap();
        assert_eq!(state.filter.column, Some(1));
    }

    #[test]
    fn test_no_numeric_column_is_an_error() {
        let df = df!("label" => ["a", "b"]).unwrap();
        let mut state = AppState::default();
        let err = state.set_data(DataSource::from_dataframe(df, None)).unwrap_err();
        assert!(matches!(err, PriceRangeError::Validation(_)));
        assert!(state.has_data());
        assert!(state.selector.is_none());
    }

    #[test]
    fn test_single_price_cannot_build_selector() {
        let df = df!("price" => [5.0, 5.0]).unwrap();
        let mut state = AppState::default();
        let err = state.set_data(DataSource::from_dataframe(df, None)).unwrap_err();
        assert!(matches!(err, PriceRangeError::InvalidDomain { .. }));
    }

    #[test]
    fn test_selector_changes_reach_the_filter() {
        let mut state = sample_state();
        assert_eq!(state.apply_selector_changes(), 0);
        assert!(!state.filter.is_active());

        let selector = state.selector.as_mut().unwrap();
        selector.set_low(50.0);
        selector.set_low(50.0);
        selector.set_high(200.0);

        assert_eq!(state.apply_selector_changes(), 2);
        assert_eq!(state.filter.range, Some(Interval::new(50.0, 200.0)));
        assert!(!state.filter.matches(480.5));
        assert!(state.filter.matches(120.0));

        state.reset_range();
        assert_eq!(state.apply_selector_changes(), 1);
        assert_eq!(state.filter.range, None);
        assert!(!state.filter.is_active());
    }

    #[test]
    fn test_dragging_back_to_full_range_clears_filter() {
        let mut state = sample_state();
        let selector = state.selector.as_mut().unwrap();
        selector.set_high(300.0);
        state.apply_selector_changes();
        assert!(state.filter.is_active());

        state.selector.as_mut().unwrap().set_high(481.0);
        assert_eq!(state.apply_selector_changes(), 1);
        assert!(state.filter.range.is_none());
        assert!(state.filter.matches(f64::NAN));
    }

    #[test]
    fn test_switching_column_rebuilds_selector() {
        let mut state = sample_state();
        state.selector.as_mut().unwrap().set_low(100.0);
        state.apply_selector_changes();

        state.select_price_column(2).unwrap();
        assert_eq!(state.filter.column, Some(2));
        assert!(state.filter.range.is_none());
        let selector = state.selector.as_ref().unwrap();
        assert_eq!((selector.low(), selector.high()), (1.0, 90.0));
    }

    #[test]
    fn test_apply_config_rebuilds_with_new_options() {
        let mut state = sample_state();
        state.selector.as_mut().unwrap().set_low(100.0);
        let mut config = state.config.clone();
        config.selector.min_separation = 10.0;
        state.apply_config(config).unwrap();

        assert!(state.filter.range.is_none());
        let selector = state.selector.as_mut().unwrap();
        selector.set_low(1000.0);
        assert_eq!(selector.low(), 471.0);
    }

    #[test]
    fn test_recent_files_are_deduplicated_and_capped() {
        let mut state = AppState::default();
        for i in 0..7 {
            state.push_recent_file(PathBuf::from(format!("{}.csv", i)));
        }
        state.push_recent_file(PathBuf::from("4.csv"));
        assert_eq!(state.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(state.recent_files[0], PathBuf::from("4.csv"));
        assert_eq!(
            state.recent_files.iter().filter(|p| **p == PathBuf::from("4.csv")).count(),
            1
        );
    }
}
