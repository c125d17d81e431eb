//! Application-wide constants and default values
//!
//! This module centralizes the magic numbers and default values used
//! throughout the application, making them easier to maintain and configure.

/// Range selector defaults
pub mod selector {
    /// Smallest allowed gap between the low and high handle
    pub const DEFAULT_MIN_SEPARATION: f64 = 1.0;

    /// Snapping increment for dragged values (0.0 = continuous)
    pub const DEFAULT_STEP: f64 = 1.0;

    /// Distance from the domain max inside which the low handle is drawn on top
    pub const DEFAULT_EMPHASIS_MARGIN: f64 = 100.0;
}

/// Slider appearance defaults
pub mod style {
    /// Background track colour
    pub const DEFAULT_TRACK_COLOR: &str = "#000000";

    /// Highlighted segment colour
    pub const DEFAULT_RANGE_COLOR: &str = "#808080";

    /// Slider width in points
    pub const DEFAULT_WIDTH: f32 = 200.0;

    /// Label prefix for displayed values
    pub const DEFAULT_CURRENCY_TEXT: &str = "BDT";

    /// Track thickness in points
    pub const TRACK_HEIGHT: f32 = 4.0;

    /// Handle radius in points
    pub const HANDLE_RADIUS: f32 = 8.0;
}

/// Filtering defaults
pub mod filters {
    /// Column name picked automatically when present
    pub const DEFAULT_PRICE_COLUMN: &str = "price";
}

/// Performance and bookkeeping constants
pub mod performance {
    /// Maximum number of recent files to track
    pub const MAX_RECENT_FILES: usize = 5;
}

/// Price distribution defaults
pub mod histogram {
    /// Number of histogram bins in the price panel
    pub const DEFAULT_BINS: usize = 20;

    /// Upper bound accepted from the config file
    pub const MAX_BINS: usize = 1000;
}

/// UI layout defaults
pub mod layout {
    /// Left panel (price controls) default width
    pub const PRICE_PANEL_WIDTH: f32 = 280.0;

    /// Price histogram height
    pub const HISTOGRAM_HEIGHT: f32 = 140.0;

    /// Table header row height
    pub const TABLE_HEADER_HEIGHT: f32 = 20.0;

    /// Table body row height
    pub const TABLE_ROW_HEIGHT: f32 = 18.0;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name, looked up in the working directory
    pub const CONFIG_FILE: &str = "price-range.json";
}
