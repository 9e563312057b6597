// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Convergence scan over increasing sample sizes N = 10^k.

use std::fmt::Write as _;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::integrate::Integrator;
use crate::error::{Result, ValidationError};

/// Total cross section at one sample size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPoint {
    /// Sample size N.
    pub calls: u64,
    /// Total cross section (pb).
    pub total: f64,
    /// Standard error of `total` (pb).
    pub error: f64,
    /// |I_k − I_{k−1}| / |I_{k−1}|; absent for the first point.
    pub relative_change: Option<f64>,
    /// Statistical band of `relative_change`: √(σ_k² + σ_{k−1}²) / |I_{k−1}|.
    pub change_band: Option<f64>,
}

/// Totals at N = 10^k for a range of exponents, same seed throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceScan {
    pub points: Vec<ScanPoint>,
}

impl ConvergenceScan {
    /// Run `integrator` once per exponent in `exponents`.
    pub fn run(integrator: &Integrator, exponents: RangeInclusive<u32>) -> Result<Self> {
        if exponents.is_empty() {
            return Err(ValidationError::Field {
                field: "exponents".into(),
                message: format!(
                    "empty range {}..={}",
                    exponents.start(),
                    exponents.end()
                ),
            }
            .into());
        }

        let mut points: Vec<ScanPoint> = Vec::new();
        for k in exponents {
            let calls = 10_u64.checked_pow(k).ok_or_else(|| ValidationError::Field {
                field: "exponents".into(),
                message: format!("10^{} overflows the call counter", k),
            })?;
            let result = integrator.with_calls(calls)?.run()?;

            let (relative_change, change_band) = match points.last() {
                Some(prev) if prev.total != 0.0 => (
                    Some((result.total - prev.total).abs() / prev.total.abs()),
                    Some(
                        (result.total_error.powi(2) + prev.error.powi(2)).sqrt()
                            / prev.total.abs(),
                    ),
                ),
                _ => (None, None),
            };

            info!(
                calls,
                total_pb = result.total,
                error_pb = result.total_error,
                relative_change,
                "Scan point"
            );

            points.push(ScanPoint {
                calls,
                total: result.total,
                error: result.total_error,
                relative_change,
                change_band,
            });
        }

        Ok(Self { points })
    }

    /// Whether the statistical band of the relative change narrows at every step.
    pub fn bands_shrinking(&self) -> bool {
        let bands: Vec<f64> = self.points.iter().filter_map(|p| p.change_band).collect();
        bands.windows(2).all(|w| w[1] < w[0])
    }

    /// Whether the relative change between successive totals decreases at every step.
    pub fn changes_shrinking(&self) -> bool {
        let changes: Vec<f64> = self
            .points
            .iter()
            .filter_map(|p| p.relative_change)
            .collect();
        changes.windows(2).all(|w| w[1] < w[0])
    }

    /// Whether every relative change lies within `n_sigma` of its band.
    pub fn within_band(&self, n_sigma: f64) -> bool {
        self.points.iter().all(|p| match (p.relative_change, p.change_band) {
            (Some(change), Some(band)) => change <= n_sigma * band,
            _ => true,
        })
    }

    /// Render as a text table.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>12} {:>14} {:>14} {:>12} {:>12}",
            "calls", "sigma [pb]", "error [pb]", "rel. change", "band"
        );
        for p in &self.points {
            let change = p
                .relative_change
                .map_or_else(|| "-".to_string(), |c| format!("{:.3e}", c));
            let band = p
                .change_band
                .map_or_else(|| "-".to_string(), |b| format!("{:.3e}", b));
            let _ = writeln!(
                out,
                "{:>12} {:>14.6e} {:>14.6e} {:>12} {:>12}",
                p.calls, p.total, p.error, change, band
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::z_peak_config;

    #[test]
    fn test_relative_change_shrinks_with_calls() {
        let integrator = Integrator::from_config(&z_peak_config()).unwrap();
        let scan = ConvergenceScan::run(&integrator, 3..=6).unwrap();

        assert_eq!(scan.points.len(), 4);
        assert_eq!(scan.points[0].calls, 1_000);
        assert_eq!(scan.points[3].calls, 1_000_000);
        assert!(scan.points[0].relative_change.is_none());

        for w in scan.points.windows(2) {
            assert!(w[1].error < w[0].error);
        }
        let changes: Vec<f64> = scan.points.iter().filter_map(|p| p.relative_change).collect();
        assert_eq!(changes.len(), 3);
        for w in changes.windows(2) {
            assert!(w[1] < w[0], "relative change grew: {:?}", changes);
        }
        assert!(scan.changes_shrinking());
        assert!(scan.bands_shrinking());
        assert!(scan.within_band(5.0));
        let last = scan.points[3].relative_change.unwrap();
        assert!(last < 0.1, "last relative change {}", last);
    }

    #[test]
    fn test_empty_range_rejected() {
        let integrator = Integrator::from_config(&z_peak_config()).unwrap();
        #[allow(clippy::reversed_empty_ranges)]
        let result = ConvergenceScan::run(&integrator, 3..=2);
        assert!(result.is_err());
    }

    #[test]
    fn test_overflowing_exponent_rejected() {
        let integrator = Integrator::from_config(&z_peak_config()).unwrap();
        assert!(ConvergenceScan::run(&integrator, 20..=20).is_err());
    }

    #[test]
    fn test_band_checks() {
        let point = |change: Option<f64>, band: Option<f64>| ScanPoint {
            calls: 1,
            total: 1.0,
            error: 0.1,
            relative_change: change,
            change_band: band,
        };
        let scan = ConvergenceScan {
            points: vec![
                point(None, None),
                point(Some(0.05), Some(0.1)),
                point(Some(0.04), Some(0.03)),
            ],
        };
        assert!(scan.bands_shrinking());
        assert!(scan.changes_shrinking());
        assert!(scan.within_band(2.0));
        assert!(!scan.within_band(1.0));
        assert_eq!(scan.to_table().lines().count(), 4);

        let growing = ConvergenceScan {
            points: vec![
                point(None, None),
                point(Some(0.01), Some(0.1)),
                point(Some(0.02), Some(0.03)),
            ],
        };
        assert!(growing.bands_shrinking());
        assert!(!growing.changes_shrinking());
    }
}
