//! Range selection model
//!
//! The state and geometry behind the dual-handle price slider, kept free of
//! any UI dependency so it can be driven and tested on its own.

mod domain;
mod selector;

pub use domain::Interval;
pub use selector::{Handle, RangeSelector, SelectorOptions};
