//! Reusable UI widgets for the price range app

mod range_slider;

pub use range_slider::{format_value, DoubleRangeSlider};
