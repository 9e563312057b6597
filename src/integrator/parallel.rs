// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Splitting a run across independent random streams.
//!
//! Worker `k` takes a contiguous block of trials and draws from the
//! generator seeded with the run seed and advanced by `k` jumps of 2¹²⁸
//! steps, so the streams never overlap. Partial histograms are merged in
//! worker order, which makes the result independent of thread scheduling.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use tracing::debug;

use super::integrate::{fill_events, Integrator};
use super::types::RunStatistics;
use crate::error::Result;
use crate::histogram::Histogram;

/// Block of trials handled by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialRange {
    /// Worker index, which selects the random stream.
    pub worker: usize,
    /// Global index of the first trial.
    pub start: u64,
    /// Number of trials.
    pub len: u64,
}

impl TrialRange {
    /// The whole run on worker 0.
    pub fn whole(calls: u64) -> Self {
        Self {
            worker: 0,
            start: 0,
            len: calls,
        }
    }
}

/// Split `calls` trials into `workers` contiguous blocks.
///
/// The first `calls % workers` blocks get one extra trial.
pub fn worker_ranges(calls: u64, workers: usize) -> Vec<TrialRange> {
    let n = workers.max(1) as u64;
    let base = calls / n;
    let rem = calls % n;
    (0..n)
        .map(|k| TrialRange {
            worker: k as usize,
            start: k * base + k.min(rem),
            len: base + u64::from(k < rem),
        })
        .collect()
}

/// Random stream of worker `worker`.
pub fn worker_rng(seed: u64, worker: usize) -> Xoshiro256PlusPlus {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    for _ in 0..worker {
        rng.jump();
    }
    rng
}

/// Fill one histogram per worker in parallel and merge them in worker order.
pub fn run_workers(integrator: &Integrator) -> Result<(Histogram, RunStatistics)> {
    let ranges = worker_ranges(integrator.calls(), integrator.workers());

    let partials: Vec<Result<(Histogram, RunStatistics)>> = ranges
        .par_iter()
        .map(|range| {
            let mut histogram = Histogram::new(integrator.edges().to_vec())?;
            let mut rng = worker_rng(integrator.seed(), range.worker);
            let stats = fill_events(
                integrator.sampler(),
                integrator.cuts(),
                &mut rng,
                integrator.calls(),
                *range,
                &mut histogram,
            )?;
            debug!(
                worker = range.worker,
                accepted = stats.accepted,
                partial_pb = histogram.total(),
                "Worker finished"
            );
            Ok((histogram, stats))
        })
        .collect();

    let mut histogram = Histogram::new(integrator.edges().to_vec())?;
    let mut statistics = RunStatistics::default();
    for partial in partials {
        let (h, stats) = partial?;
        histogram.merge(&h)?;
        statistics.merge(&stats);
    }

    Ok((histogram, statistics))
}
