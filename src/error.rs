//! Error types for price-range
//!
//! One typed error for the whole application, built with thiserror.
//! The range selector itself never fails at runtime (it clamps), so the
//! only selector variants here are the construction-time ones.

use thiserror::Error;

/// Main error type for price-range operations
#[derive(Error, Debug)]
pub enum PriceRangeError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Configuration file or value error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Column not found in data
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Column exists but holds no usable numbers
    #[error("Column '{column}' has no numeric values")]
    NonNumericColumn { column: String },

    /// Empty dataset error
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// Selector domain with min >= max or non-finite bounds
    #[error("Invalid range domain: min {min} must be finite and below max {max}")]
    InvalidDomain { min: f64, max: f64 },

    /// Data or option validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard access error
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Result type alias for price-range operations
pub type Result<T> = std::result::Result<T, PriceRangeError>;

/// UI-friendly error message formatting
impl PriceRangeError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            PriceRangeError::FileIo(e) => format!("File error: {}", e),
            PriceRangeError::Polars(e) => format!("Data error: {}", e),
            PriceRangeError::Config(msg) => format!("Config error: {}", msg),
            PriceRangeError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            PriceRangeError::ColumnNotFound { column } => {
                format!("Column '{}' not found", column)
            }
            PriceRangeError::NonNumericColumn { column } => {
                format!("Column '{}' is not a price column", column)
            }
            PriceRangeError::EmptyDataset => "Dataset is empty".to_string(),
            PriceRangeError::InvalidDomain { min, max } => {
                format!("Cannot build a range from {} to {}", min, max)
            }
            PriceRangeError::Validation(msg) => format!("Validation error: {}", msg),
            PriceRangeError::Json(e) => format!("JSON error: {}", e),
            PriceRangeError::Clipboard(e) => format!("Clipboard error: {}", e),
        }
    }

    /// Get a short title for the error (for the error banner)
    pub fn title(&self) -> &'static str {
        match self {
            PriceRangeError::FileIo(_) => "File Error",
            PriceRangeError::Polars(_) => "Data Error",
            PriceRangeError::Config(_) => "Configuration Error",
            PriceRangeError::UnsupportedFormat { .. } => "Unsupported Format",
            PriceRangeError::ColumnNotFound { .. } => "Column Not Found",
            PriceRangeError::NonNumericColumn { .. } => "Not Numeric",
            PriceRangeError::EmptyDataset => "Empty Dataset",
            PriceRangeError::InvalidDomain { .. } => "Invalid Range",
            PriceRangeError::Validation(_) => "Validation Error",
            PriceRangeError::Json(_) => "JSON Error",
            PriceRangeError::Clipboard(_) => "Clipboard Error",
        }
    }
}
