// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Integration statistics and result types.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::cuts::Rejection;
use crate::histogram::Histogram;

/// Acceptance bookkeeping of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Phase-space points drawn.
    pub trials: u64,
    /// Points that passed every cut.
    pub accepted: u64,
    /// Rejected by the pT cut.
    pub rejected_pt: u64,
    /// Rejected by the pair-rapidity cut.
    pub rejected_pair_rapidity: u64,
    /// Rejected by the lepton-rapidity cut.
    pub rejected_lepton_rapidity: u64,
    /// Rejected by the invariant-mass window.
    pub rejected_mass: u64,
}

impl RunStatistics {
    /// Count a rejected trial.
    pub fn reject(&mut self, reason: Rejection) {
        match reason {
            Rejection::TransverseMomentum => self.rejected_pt += 1,
            Rejection::PairRapidity => self.rejected_pair_rapidity += 1,
            Rejection::LeptonRapidity => self.rejected_lepton_rapidity += 1,
            Rejection::InvariantMass => self.rejected_mass += 1,
        }
    }

    /// Total rejected trials.
    pub fn rejected(&self) -> u64 {
        self.rejected_pt
            + self.rejected_pair_rapidity
            + self.rejected_lepton_rapidity
            + self.rejected_mass
    }

    /// Fraction of trials that were accepted.
    pub fn efficiency(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.accepted as f64 / self.trials as f64
        }
    }

    /// Add the counts of another run.
    pub fn merge(&mut self, other: &RunStatistics) {
        self.trials += other.trials;
        self.accepted += other.accepted;
        self.rejected_pt += other.rejected_pt;
        self.rejected_pair_rapidity += other.rejected_pair_rapidity;
        self.rejected_lepton_rapidity += other.rejected_lepton_rapidity;
        self.rejected_mass += other.rejected_mass;
    }
}

/// Cross section in one rapidity bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinResult {
    /// Lower bin edge.
    pub low: f64,
    /// Upper bin edge.
    pub high: f64,
    /// Cross section in the bin (pb), not divided by the bin width.
    pub value: f64,
    /// Monte Carlo standard error (pb).
    pub error: f64,
    /// Accepted events in the bin.
    pub entries: u64,
}

/// Result of an integration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionResult {
    /// Number of phase-space points (N).
    pub calls: u64,
    /// Generator seed.
    pub seed: u64,
    /// Worker streams the run was split into.
    pub workers: usize,
    /// Per-bin cross sections, in bin order.
    pub bins: Vec<BinResult>,
    /// Sum over all bins (pb).
    pub total: f64,
    /// Monte Carlo standard error of `total` (pb).
    pub total_error: f64,
    /// Accepted weight with |y| below the first edge (pb).
    pub underflow: f64,
    /// Accepted weight with |y| at or above the last edge (pb).
    pub overflow: f64,
    /// Acceptance bookkeeping.
    pub statistics: RunStatistics,
}

impl CrossSectionResult {
    /// Assemble the result from a filled histogram.
    pub fn from_histogram(
        histogram: &Histogram,
        statistics: RunStatistics,
        calls: u64,
        seed: u64,
        workers: usize,
    ) -> Self {
        let edges = histogram.edges();
        let errors = histogram.errors(calls);
        let bins = histogram
            .values()
            .iter()
            .zip(&errors)
            .zip(histogram.entries())
            .enumerate()
            .map(|(i, ((&value, &error), &entries))| BinResult {
                low: edges[i],
                high: edges[i + 1],
                value,
                error,
                entries,
            })
            .collect();

        Self {
            calls,
            seed,
            workers,
            bins,
            total: histogram.total(),
            total_error: histogram.total_error(calls),
            underflow: histogram.underflow(),
            overflow: histogram.overflow(),
            statistics,
        }
    }

    /// Per-bin cross sections in bin order.
    pub fn values(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.value).collect()
    }

    /// Render as a fixed-width text table.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>8} {:>8} {:>14} {:>14} {:>9}",
            "|y| low", "|y| high", "sigma [pb]", "error [pb]", "entries"
        );
        for bin in &self.bins {
            let _ = writeln!(
                out,
                "{:>8.3} {:>8.3} {:>14.6e} {:>14.6e} {:>9}",
                bin.low, bin.high, bin.value, bin.error, bin.entries
            );
        }
        let _ = writeln!(
            out,
            "total: {:.6e} +- {:.6e} pb  (calls={}, accepted={}, efficiency={:.4}, seed={}, workers={})",
            self.total,
            self.total_error,
            self.calls,
            self.statistics.accepted,
            self.statistics.efficiency(),
            self.seed,
            self.workers
        );
        out
    }
}
