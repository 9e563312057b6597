// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Weighted one-dimensional histograms.
//!
//! A [`Histogram`] owns its bin edges and per-bin accumulators. Each bin keeps
//! the running sum of weights, the sum of squared weights (for the Monte Carlo
//! standard error) and the number of entries. Bins are half-open, `[lo, hi)`.
//!
//! Histograms filled from independent streams combine with [`Histogram::merge`],
//! which is how the parallel integrator reduces its per-worker results.

pub mod sink;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::validation::validate_edge_layout;

pub use sink::{EventSink, FillPoint};

/// `bins` uniform bins between `low` and `high`; the last edge is exactly `high`.
pub fn uniform_edges(low: f64, high: f64, bins: usize) -> Vec<f64> {
    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| low + (high - low) * i as f64 / bins as f64)
        .collect();
    if let Some(last) = edges.last_mut() {
        *last = high;
    }
    edges
}

/// Weighted histogram with fixed, contiguous bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    edges: Vec<f64>,
    sums: Vec<f64>,
    sums_sq: Vec<f64>,
    entries: Vec<u64>,
    underflow: f64,
    overflow: f64,
}

impl Histogram {
    /// Create an empty histogram over the given edges.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        validate_edge_layout(&edges)?;
        let bins = edges.len() - 1;
        Ok(Self {
            edges,
            sums: vec![0.0; bins],
            sums_sq: vec![0.0; bins],
            entries: vec![0; bins],
            underflow: 0.0,
            overflow: 0.0,
        })
    }

    /// Create an empty histogram with `bins` uniform bins in `[low, high)`.
    pub fn uniform(low: f64, high: f64, bins: usize) -> Result<Self> {
        Self::new(uniform_edges(low, high, bins))
    }

    /// An empty histogram with the same binning.
    pub fn empty_like(&self) -> Self {
        let bins = self.len();
        Self {
            edges: self.edges.clone(),
            sums: vec![0.0; bins],
            sums_sq: vec![0.0; bins],
            entries: vec![0; bins],
            underflow: 0.0,
            overflow: 0.0,
        }
    }

    /// Bin edges (one more than the number of bins).
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    /// Whether the histogram has no bins. Never true for a constructed histogram.
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Index of the bin containing `x`, if any.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if x.is_nan() {
            return None;
        }
        let idx = self.edges.partition_point(|&edge| edge <= x);
        if idx == 0 || idx == self.edges.len() {
            None
        } else {
            Some(idx - 1)
        }
    }

    /// Add `weight` at `x`. Returns whether `x` fell inside the binned range.
    ///
    /// Weights outside the range go to the underflow (`x` below the first
    /// edge) or overflow (`x` at or above the last edge, or NaN) accumulators.
    pub fn add(&mut self, x: f64, weight: f64) -> bool {
        match self.find_bin(x) {
            Some(bin) => {
                self.sums[bin] += weight;
                self.sums_sq[bin] += weight * weight;
                self.entries[bin] += 1;
                true
            }
            None => {
                if x < self.edges[0] {
                    self.underflow += weight;
                } else {
                    self.overflow += weight;
                }
                false
            }
        }
    }

    /// Add the contents of `other`, which must have identical edges.
    pub fn merge(&mut self, other: &Histogram) -> Result<()> {
        if self.edges != other.edges {
            return Err(ValidationError::BinEdges(format!(
                "cannot merge histograms with different binning ({} vs {} edges)",
                self.edges.len(),
                other.edges.len()
            ))
            .into());
        }

        for (a, b) in self.sums.iter_mut().zip(&other.sums) {
            *a += b;
        }
        for (a, b) in self.sums_sq.iter_mut().zip(&other.sums_sq) {
            *a += b;
        }
        for (a, b) in self.entries.iter_mut().zip(&other.entries) {
            *a += b;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        Ok(())
    }

    /// Accumulated weight per bin, in bin order.
    pub fn values(&self) -> &[f64] {
        &self.sums
    }

    /// Number of entries per bin.
    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// Sum of weights over all bins (under/overflow excluded).
    pub fn total(&self) -> f64 {
        self.sums.iter().sum()
    }

    /// Weight that fell below the first edge.
    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    /// Weight that fell at or above the last edge.
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Width of each bin.
    pub fn bin_widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Values divided by bin width, i.e. dσ/dy instead of σ per bin.
    pub fn differential(&self) -> Vec<f64> {
        self.sums
            .iter()
            .zip(self.bin_widths())
            .map(|(v, w)| v / w)
            .collect()
    }

    /// Monte Carlo standard error per bin for a run of `calls` trials.
    ///
    /// Weights are stored already divided by `calls`, so with I = Σw the
    /// variance of the estimate is (N·Σw² − I²) / (N − 1).
    pub fn errors(&self, calls: u64) -> Vec<f64> {
        self.sums
            .iter()
            .zip(&self.sums_sq)
            .map(|(&sum, &sum_sq)| standard_error(sum, sum_sq, calls))
            .collect()
    }

    /// Monte Carlo standard error of [`total`](Self::total).
    pub fn total_error(&self, calls: u64) -> f64 {
        standard_error(self.total(), self.sums_sq.iter().sum(), calls)
    }
}

fn standard_error(sum: f64, sum_sq: f64, calls: u64) -> f64 {
    if calls < 2 {
        return 0.0;
    }
    let n = calls as f64;
    ((n * sum_sq - sum * sum) / (n - 1.0)).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rapidity_histogram() -> Histogram {
        Histogram::uniform(0.0, 2.4, 24).unwrap()
    }

    #[test]
    fn test_uniform_edges() {
        let edges = uniform_edges(0.0, 2.4, 24);
        assert_eq!(edges.len(), 25);
        assert_eq!(edges[0], 0.0);
        assert_eq!(edges[24], 2.4);
        for w in edges.windows(2) {
            assert_relative_eq!(w[1] - w[0], 0.1, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_new_rejects_bad_edges() {
        assert!(Histogram::new(vec![]).is_err());
        assert!(Histogram::new(vec![1.0]).is_err());
        assert!(Histogram::new(vec![0.0, 2.0, 1.0]).is_err());
        assert!(Histogram::uniform(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_find_bin() {
        let h = Histogram::new(vec![0.0, 1.0, 2.0, 4.0]).unwrap();
        assert_eq!(h.find_bin(0.0), Some(0));
        assert_eq!(h.find_bin(0.999), Some(0));
        assert_eq!(h.find_bin(1.0), Some(1));
        assert_eq!(h.find_bin(3.5), Some(2));
        assert_eq!(h.find_bin(4.0), None);
        assert_eq!(h.find_bin(-0.1), None);
        assert_eq!(h.find_bin(f64::NAN), None);
    }

    #[test]
    fn test_add_routes_out_of_range() {
        let mut h = Histogram::new(vec![0.0, 1.0, 2.0]).unwrap();
        assert!(h.add(0.5, 1.0));
        assert!(!h.add(-1.0, 2.0));
        assert!(!h.add(2.0, 4.0));
        assert!(!h.add(f64::NAN, 8.0));

        assert_eq!(h.values(), &[1.0, 0.0]);
        assert_eq!(h.entries(), &[1, 0]);
        assert_eq!(h.underflow(), 2.0);
        assert_eq!(h.overflow(), 12.0);
        assert_eq!(h.total(), 1.0);
    }

    #[test]
    fn test_merge_matches_single_fill() {
        let entries = [(0.05, 1.0), (1.25, 2.0), (2.35, 4.0), (1.25, 8.0), (3.0, 16.0)];

        let mut single = rapidity_histogram();
        for &(x, w) in &entries {
            single.add(x, w);
        }

        let mut left = rapidity_histogram();
        let mut right = rapidity_histogram();
        for &(x, w) in &entries[..2] {
            left.add(x, w);
        }
        for &(x, w) in &entries[2..] {
            right.add(x, w);
        }
        left.merge(&right).unwrap();

        assert_eq!(left, single);
    }

    #[test]
    fn test_merge_rejects_different_binning() {
        let mut a = rapidity_histogram();
        let b = Histogram::uniform(0.0, 2.4, 12).unwrap();
        assert!(a.merge(&b).is_err());
    }

    #[test]
    fn test_empty_like_keeps_edges() {
        let mut h = rapidity_histogram();
        h.add(1.0, 3.0);
        let e = h.empty_like();
        assert_eq!(e.edges(), h.edges());
        assert_eq!(e.total(), 0.0);
    }

    #[test]
    fn test_differential_divides_by_width() {
        let mut h = Histogram::new(vec![0.0, 0.5, 2.5]).unwrap();
        h.add(0.25, 1.0);
        h.add(1.0, 1.0);
        assert_eq!(h.differential(), vec![2.0, 0.5]);
    }

    #[test]
    fn test_errors_constant_weights() {
        // N calls, k of which land in the bin with weight 1/N each:
        // variance = (N·k/N² − k²/N²) / (N − 1) = k(N − k) / (N²(N − 1))
        let calls = 100;
        let k = 25;
        let mut h = Histogram::new(vec![0.0, 1.0]).unwrap();
        for _ in 0..k {
            h.add(0.5, 1.0 / calls as f64);
        }
        let n = calls as f64;
        let kf = k as f64;
        let expected = (kf * (n - kf) / (n * n * (n - 1.0))).sqrt();
        assert_relative_eq!(h.errors(calls)[0], expected, max_relative = 1e-12);
        assert_relative_eq!(h.total_error(calls), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_errors_empty_bins_are_zero() {
        let h = rapidity_histogram();
        assert!(h.errors(1000).iter().all(|&e| e == 0.0));
        assert_eq!(h.total_error(1), 0.0);
    }
}
