//! Dual-handle range selector state
//!
//! Holds the `(low, high)` selection over a fixed [`Domain`], keeps the two
//! handles strictly ordered by clamping, and reports each effective change
//! to a listener exactly once.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Domain, Interval, TrackSegment};
use crate::constants::selector::*;
use crate::error::{PriceRangeError, Result};

/// Listener invoked with the new interval after every effective change
pub type ChangeCallback = Box<dyn FnMut(Interval)>;

/// Behavioural knobs of a selector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    /// Smallest allowed `high - low`
    pub min_separation: f64,

    /// Snapping increment for pointer input (0.0 = continuous)
    pub step: f64,

    /// Low handle is stacked on top when it is within this distance of max
    pub emphasis_margin: f64,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            min_separation: DEFAULT_MIN_SEPARATION,
            step: DEFAULT_STEP,
            emphasis_margin: DEFAULT_EMPHASIS_MARGIN,
        }
    }
}

impl SelectorOptions {
    /// Check the options against the domain they will be used with
    pub fn validate(&self, domain: &Domain) -> Result<()> {
        if !self.min_separation.is_finite() || self.min_separation <= 0.0 {
            return Err(PriceRangeError::Validation(format!(
                "minimum separation must be positive, got {}",
                self.min_separation
            )));
        }
        if self.min_separation > domain.span() {
            return Err(PriceRangeError::Validation(format!(
                "minimum separation {} exceeds the range span {}",
                self.min_separation,
                domain.span()
            )));
        }
        let magnitude = domain.min().abs().max(domain.max().abs());
        if !separation_resolvable(magnitude, self.min_separation) {
            return Err(PriceRangeError::Validation(format!(
                "minimum separation {} is lost to rounding at values near {}",
                self.min_separation, magnitude
            )));
        }
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(PriceRangeError::Validation(format!(
                "step must be zero or positive, got {}",
                self.step
            )));
        }
        if !self.emphasis_margin.is_finite() || self.emphasis_margin < 0.0 {
            return Err(PriceRangeError::Validation(format!(
                "emphasis margin must be zero or positive, got {}",
                self.emphasis_margin
            )));
        }
        Ok(())
    }
}

/// True when `gap` stays visible in f64 arithmetic at `magnitude`.
///
/// Checked at the largest magnitude of the domain; spacing between floats
/// only shrinks towards zero, so every value in the domain passes too.
fn separation_resolvable(magnitude: f64, gap: f64) -> bool {
    magnitude + gap / 2.0 > magnitude
}

/// One of the two draggable handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

/// Which handle is drawn (and hit-tested) on top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStacking {
    LowOnTop,
    HighOnTop,
}

impl HandleStacking {
    pub fn top(self) -> Handle {
        match self {
            HandleStacking::LowOnTop => Handle::Low,
            HandleStacking::HighOnTop => Handle::High,
        }
    }

    pub fn bottom(self) -> Handle {
        match self {
            HandleStacking::LowOnTop => Handle::High,
            HandleStacking::HighOnTop => Handle::Low,
        }
    }
}

/// Stacking order of the handles.
///
/// Near the top of the range (or when the handles coincide) the low handle
/// goes on top so it can still be grabbed and pulled left.
pub fn handle_stacking(low: f64, high: f64, max: f64, emphasis_margin: f64) -> HandleStacking {
    if low > max - emphasis_margin || low == high {
        HandleStacking::LowOnTop
    } else {
        HandleStacking::HighOnTop
    }
}

/// Two-handle selection over a fixed domain.
pub struct RangeSelector {
    domain: Domain,
    options: SelectorOptions,
    low: f64,
    high: f64,
    last_notified: Interval,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSelector")
            .field("domain", &self.domain)
            .field("options", &self.options)
            .field("low", &self.low)
            .field("high", &self.high)
            .field("last_notified", &self.last_notified)
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

impl RangeSelector {
    /// Create a selector spanning the whole `[min, max]` domain with default options
    pub fn new(min: f64, max: f64) -> Result<Self> {
        Self::with_options(min, max, SelectorOptions::default())
    }

    /// Create a selector with explicit options
    pub fn with_options(min: f64, max: f64, options: SelectorOptions) -> Result<Self> {
        let domain = Domain::new(min, max)?;
        options.validate(&domain)?;
        Ok(Self {
            domain,
            options,
            low: min,
            high: max,
            last_notified: Interval::new(min, max),
            on_change: None,
        })
    }

    /// Attach the change listener (builder form)
    pub fn on_change(mut self, callback: impl FnMut(Interval) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Current selection
    pub fn interval(&self) -> Interval {
        Interval::new(self.low, self.high)
    }

    /// The interval most recently handed to the listener
    pub fn last_notified(&self) -> Interval {
        self.last_notified
    }

    /// True when the selection covers the entire domain
    pub fn is_full_range(&self) -> bool {
        self.low == self.domain.min() && self.high == self.domain.max()
    }

    /// Move the low handle; the value is clamped to `[min, high - min_separation]`.
    ///
    /// Returns the new interval when this produced a notification.
    pub fn set_low(&mut self, requested: f64) -> Option<Interval> {
        if !requested.is_finite() {
            return None;
        }
        let ceiling = self.high - self.options.min_separation;
        self.low = requested.min(ceiling).max(self.domain.min());
        self.notify_if_changed()
    }

    /// Move the high handle; the value is clamped to `[low + min_separation, max]`.
    ///
    /// Returns the new interval when this produced a notification.
    pub fn set_high(&mut self, requested: f64) -> Option<Interval> {
        if !requested.is_finite() {
            return None;
        }
        let floor = self.low + self.options.min_separation;
        self.high = requested.max(floor).min(self.domain.max());
        self.notify_if_changed()
    }

    /// Move the given handle
    pub fn set(&mut self, handle: Handle, requested: f64) -> Option<Interval> {
        match handle {
            Handle::Low => self.set_low(requested),
            Handle::High => self.set_high(requested),
        }
    }

    /// Move a handle by `steps` increments of the configured step
    pub fn nudge(&mut self, handle: Handle, steps: i32) -> Option<Interval> {
        let increment = if self.options.step > 0.0 {
            self.options.step
        } else {
            self.options.min_separation
        };
        let current = self.value(handle);
        self.set(handle, current + increment * f64::from(steps))
    }

    /// Current value of one handle
    pub fn value(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Low => self.low,
            Handle::High => self.high,
        }
    }

    /// Go back to the full domain
    pub fn reset(&mut self) -> Option<Interval> {
        self.low = self.domain.min();
        self.high = self.domain.max();
        self.notify_if_changed()
    }

    /// Unrounded 0..=1 position of a value along the track
    pub fn fraction_of(&self, value: f64) -> f64 {
        self.domain.fraction_of(value).clamp(0.0, 1.0)
    }

    /// Domain value under a 0..=1 track position, snapped to the step
    pub fn value_at_fraction(&self, fraction: f64) -> f64 {
        let min = self.domain.min();
        let raw = min + fraction.clamp(0.0, 1.0) * self.domain.span();
        let snapped = if self.options.step > 0.0 {
            min + ((raw - min) / self.options.step).round() * self.options.step
        } else {
            raw
        };
        snapped.clamp(min, self.domain.max())
    }

    /// Highlighted part of the track for the current selection
    pub fn track_segment(&self) -> TrackSegment {
        TrackSegment::new(&self.domain, self.interval())
    }

    /// Stacking order for the current selection
    pub fn stacking(&self) -> HandleStacking {
        handle_stacking(
            self.low,
            self.high,
            self.domain.max(),
            self.options.emphasis_margin,
        )
    }

    fn notify_if_changed(&mut self) -> Option<Interval> {
        let current = self.interval();
        if current == self.last_notified {
            return None;
        }
        self.last_notified = current;
        if let Some(callback) = self.on_change.as_mut() {
            callback(current);
        }
        Some(current)
    }
}
