//! Value domain, selected interval and derived track geometry

use serde::{Deserialize, Serialize};

use crate::error::{PriceRangeError, Result};

/// Fixed inclusive value range `[min, max]` a selector works over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    /// Create a domain; both bounds must be finite and `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(PriceRangeError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the domain (always positive)
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Unrounded position of `value` along the domain, 0.0 at min and 1.0 at max
    pub fn fraction_of(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Position of `value` as a whole percentage of the domain
    pub fn percent_of(&self, value: f64) -> i32 {
        (self.fraction_of(value) * 100.0).round() as i32
    }
}

/// A `(low, high)` pair as reported to change listeners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive membership test
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Whether `[start, end]` overlaps this interval
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        start <= self.high && end >= self.low
    }
}

/// Highlighted part of the track, as percentages of the track width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSegment {
    pub left_percent: i32,
    pub width_percent: i32,
}

impl TrackSegment {
    pub fn new(domain: &Domain, interval: Interval) -> Self {
        let left = domain.percent_of(interval.low);
        let right = domain.percent_of(interval.high);
        Self {
            left_percent: left,
            width_percent: right - left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_rejects_degenerate_bounds() {
        assert!(Domain::new(0.0, 500.0).is_ok());
        assert!(matches!(
            Domain::new(10.0, 10.0),
            Err(PriceRangeError::InvalidDomain { .. })
        ));
        assert!(Domain::new(10.0, 5.0).is_err());
        assert!(Domain::new(f64::NAN, 5.0).is_err());
        assert!(Domain::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_percent_of_endpoints_and_rounding() {
        let domain = Domain::new(0.0, 500.0).unwrap();
        assert_eq!(domain.percent_of(0.0), 0);
        assert_eq!(domain.percent_of(500.0), 100);
        assert_eq!(domain.percent_of(250.0), 50);
        // 2.5 / 500 * 100 = 0.5, rounds away from zero
        assert_eq!(domain.percent_of(2.5), 1);
        assert_eq!(domain.percent_of(2.0), 0);

        let offset = Domain::new(100.0, 300.0).unwrap();
        assert_eq!(offset.percent_of(100.0), 0);
        assert_eq!(offset.percent_of(150.0), 25);
        assert_eq!(offset.percent_of(300.0), 100);
    }

    #[test]
    fn test_percent_of_is_monotonic() {
        let domain = Domain::new(-40.0, 1234.0).unwrap();
        let mut previous = i32::MIN;
        let mut value = domain.min();
        while value <= domain.max() {
            let percent = domain.percent_of(value);
            assert!(percent >= previous, "percent_of decreased at {}", value);
            previous = percent;
            value += 0.75;
        }
    }

    #[test]
    fn test_track_segment_geometry() {
        let domain = Domain::new(0.0, 500.0).unwrap();
        let segment = TrackSegment::new(&domain, Interval::new(100.0, 400.0));
        assert_eq!(segment.left_percent, 20);
        assert_eq!(segment.width_percent, 60);

        let full = TrackSegment::new(&domain, Interval::new(0.0, 500.0));
        assert_eq!(full, TrackSegment { left_percent: 0, width_percent: 100 });
    }

    #[test]
    fn test_interval_membership() {
        let interval = Interval::new(10.0, 20.0);
        assert!(interval.contains(10.0));
        assert!(interval.contains(20.0));
        assert!(!interval.contains(20.5));
        assert!(interval.overlaps(0.0, 10.0));
        assert!(interval.overlaps(19.0, 30.0));
        assert!(!interval.overlaps(21.0, 30.0));
    }
}
