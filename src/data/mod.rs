pub mod source;
pub mod stats;

// Re-export key types for convenience
pub use source::DataSource;
pub use stats::{HistogramBin, PriceSummary};
