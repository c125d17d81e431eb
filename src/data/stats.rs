use polars::prelude::*;

use crate::range::Interval;

/// Summary of a price column
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Calculate summary statistics from a Series using polars
pub fn calculate_summary(series: &Series) -> PriceSummary {
    let series_f64 = match series.cast(&DataType::Float64) {
        Ok(s) => s,
        Err(_) => return PriceSummary::default(),
    };

    let chunked = match series_f64.f64() {
        Ok(c) => c,
        Err(_) => return PriceSummary::default(),
    };

    let count = chunked.len() - chunked.null_count();
    if count == 0 {
        return PriceSummary::default();
    }

    PriceSummary {
        count,
        min: chunked.min().unwrap_or(0.0),
        max: chunked.max().unwrap_or(0.0),
        mean: chunked.mean().unwrap_or(0.0),
        median: chunked.median().unwrap_or(0.0),
    }
}

/// Summary from plain values; NaNs are treated as missing
pub fn calculate_summary_vec(values: &[f64]) -> PriceSummary {
    let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let series = Series::new("price".into(), &clean);
    calculate_summary(&series)
}

/// One histogram bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u32,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Whether any part of the bin falls inside the selection
    pub fn overlaps(&self, interval: Interval) -> bool {
        interval.overlaps(self.start, self.end)
    }
}

/// Equal-width histogram of the finite values over `[min, max]`
pub fn histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<HistogramBin> {
    profiling::scope!("histogram");

    if bins == 0 || !(max > min) {
        return Vec::new();
    }

    let bin_width = (max - min) / bins as f64;
    let mut counts = vec![0u32; bins];
    for &v in values.iter().filter(|v| v.is_finite()) {
        if v < min || v > max {
            continue;
        }
        let bin = ((v - min) / bin_width).floor() as usize;
        counts[bin.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * bin_width,
            end: min + (i + 1) as f64 * bin_width,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_summary() {
        let data = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let series = Series::new("price".into(), &data);
        let summary = calculate_summary(&series);

        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 30.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 50.0);
    }

    #[test]
    fn test_summary_ignores_nan() {
        let summary = calculate_summary_vec(&[1.0, f64::NAN, 3.0]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 2.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = calculate_summary_vec(&[]);
        assert_eq!(summary, PriceSummary::default());
    }

    #[test]
    fn test_histogram_counts_and_edges() {
        let values = [0.0, 1.0, 4.9, 5.0, 9.9, 10.0, f64::NAN, 42.0];
        let bins = histogram(&values, 0.0, 10.0, 2);

        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[0].end, 5.0);
        assert_eq!(bins[0].count, 3);
        // The max itself lands in the last bin; 42 is outside the range
        assert_eq!(bins[1].count, 3);
        assert_eq!(bins[1].center(), 7.5);
        assert_eq!(bins[1].width(), 5.0);
    }

    #[test]
    fn test_histogram_degenerate_inputs() {
        assert!(histogram(&[1.0], 0.0, 10.0, 0).is_empty());
        assert!(histogram(&[1.0], 5.0, 5.0, 4).is_empty());
    }

    #[test]
    fn test_bin_overlap_with_selection() {
        let bins = histogram(&[], 0.0, 100.0, 4);
        let selection = Interval::new(30.0, 55.0);
        let highlighted: Vec<bool> = bins.iter().map(|b| b.overlaps(selection)).collect();
        assert_eq!(highlighted, vec![false, true, true, false]);
    }
}
