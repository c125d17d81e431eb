//! Price filter state
//!
//! Tracks which column drives the filter and the interval most recently
//! reported by the range selector.

use crate::range::Interval;

/// Active price filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceFilter {
    /// Column the price values come from
    pub column: Option<usize>,

    /// Selected interval; `None` means every row passes
    pub range: Option<Interval>,
}

impl PriceFilter {
    /// Create a PriceFilter with no column and no range
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the filter completely
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Switch to another column; the old range no longer applies
    pub fn select_column(&mut self, column: usize) {
        if self.column != Some(column) {
            self.column = Some(column);
            self.range = None;
        }
    }

    /// Check if rows are being excluded
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.range.is_some()
    }

    /// Apply an interval reported by the selector
    pub fn set_range(&mut self, interval: Interval) {
        self.range = Some(interval);
    }

    /// Drop the interval but keep the column
    pub fn clear_range(&mut self) {
        self.range = None;
    }

    /// Check if a price value passes the filter
    pub fn matches(&self, value: f64) -> bool {
        match self.range {
            Some(range) => range.contains(value),
            None => true,
        }
    }
}
