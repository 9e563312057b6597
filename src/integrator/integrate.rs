// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Plain Monte Carlo integration of the γγ → ℓ⁺ℓ⁻ cross section.
//!
//! Each trial draws a phase-space point, applies the acceptance cuts and, if
//! accepted, adds jacobian · ħc² / N · |M|² to the sink at |y_ll|. Dividing by
//! N during the fill means the sink holds the cross-section estimate directly.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, error, info, trace};

use super::cuts::AcceptanceCuts;
use super::observables::LeptonObservables;
use super::parallel::{run_workers, worker_rng, TrialRange};
use super::types::{CrossSectionResult, RunStatistics};
use super::{GEV2_TO_PB, SCALE_Q2};
use crate::config::{Config, CutsConfig, ResourceLimits};
use crate::error::{DegenerateEvent, Result};
use crate::histogram::{EventSink, FillPoint, Histogram};
use crate::matrix_element::photon_photon;
use crate::phase_space::{PhaseSpacePoint, PhaseSpaceSampler};
use crate::validation::{validate_bin_edges, validate_cuts, validate_run};

/// Monte Carlo integrator for the binned cross section.
#[derive(Debug, Clone)]
pub struct Integrator {
    sampler: PhaseSpaceSampler,
    cuts: AcceptanceCuts,
    edges: Vec<f64>,
    calls: u64,
    seed: u64,
    workers: usize,
    limits: ResourceLimits,
}

impl Integrator {
    /// Build an integrator from a configuration, validating it first.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: PhaseSpaceSampler::new(config.kinematics.mmin, config.kinematics.mmax)?,
            cuts: AcceptanceCuts::from(&config.cuts),
            edges: config.binning.edges(),
            calls: config.run.calls,
            seed: config.run.seed,
            workers: config.run.workers,
            limits: config.limits.clone(),
        })
    }

    /// Number of phase-space points per run.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Generator seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Worker streams per run.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Phase-space sampler.
    pub fn sampler(&self) -> &PhaseSpaceSampler {
        &self.sampler
    }

    /// Acceptance cuts.
    pub fn cuts(&self) -> &AcceptanceCuts {
        &self.cuts
    }

    /// Histogram bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Same setup with a different sample size.
    pub fn with_calls(&self, calls: u64) -> Result<Self> {
        validate_run(calls, self.workers, &self.limits)?;
        Ok(Self {
            calls,
            ..self.clone()
        })
    }

    /// Same setup with a different number of worker streams.
    pub fn with_workers(&self, workers: usize) -> Result<Self> {
        validate_run(self.calls, workers, &self.limits)?;
        Ok(Self {
            workers,
            ..self.clone()
        })
    }

    /// Same setup with a different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Same setup with different cuts.
    pub fn with_cuts(&self, cuts: &CutsConfig) -> Result<Self> {
        validate_cuts(cuts)?;
        Ok(Self {
            cuts: AcceptanceCuts::from(cuts),
            ..self.clone()
        })
    }

    /// Same setup with different bin edges.
    pub fn with_edges(&self, edges: Vec<f64>) -> Result<Self> {
        validate_bin_edges(&edges, &self.limits)?;
        Ok(Self {
            edges,
            ..self.clone()
        })
    }

    /// Run the integration and assemble the per-bin cross sections.
    ///
    /// The result is a deterministic function of (seed, calls, workers).
    pub fn run(&self) -> Result<CrossSectionResult> {
        info!(
            calls = self.calls,
            seed = self.seed,
            workers = self.workers,
            mmin = self.sampler.mmin(),
            mmax = self.sampler.mmax(),
            bins = self.edges.len() - 1,
            "Starting integration"
        );
        let start = Instant::now();

        let (histogram, statistics) = if self.workers == 1 {
            let mut histogram = Histogram::new(self.edges.clone())?;
            let mut rng = worker_rng(self.seed, 0);
            let statistics = fill_events(
                &self.sampler,
                &self.cuts,
                &mut rng,
                self.calls,
                TrialRange::whole(self.calls),
                &mut histogram,
            )?;
            (histogram, statistics)
        } else {
            run_workers(self)?
        };

        let result = CrossSectionResult::from_histogram(
            &histogram,
            statistics,
            self.calls,
            self.seed,
            self.workers,
        );

        info!(
            total_pb = result.total,
            error_pb = result.total_error,
            accepted = result.statistics.accepted,
            efficiency = result.statistics.efficiency(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Integration finished"
        );

        Ok(result)
    }

    /// Run sequentially into an arbitrary sink (e.g. an interpolation grid).
    ///
    /// Uses the same random stream as [`run`](Self::run) with one worker.
    pub fn run_into<S: EventSink + ?Sized>(&self, sink: &mut S) -> Result<RunStatistics> {
        let mut rng = worker_rng(self.seed, 0);
        fill_events(
            &self.sampler,
            &self.cuts,
            &mut rng,
            self.calls,
            TrialRange::whole(self.calls),
            sink,
        )
    }
}

/// Event weight in pb: jacobian · ħc² / N · |M|²(s, u, t).
///
/// The matrix element receives (s, u, t); it is symmetric in t ↔ u.
pub fn event_weight(point: &PhaseSpacePoint, calls: u64) -> f64 {
    let jacobian = point.jacobian * GEV2_TO_PB / calls as f64;
    jacobian * photon_photon(point.s, point.u, point.t)
}

/// Why an accepted event cannot be filled, if it cannot.
pub(crate) fn degeneracy(
    point: &PhaseSpacePoint,
    observables: &LeptonObservables,
    weight: f64,
) -> Option<&'static str> {
    if observables.pt == 0.0 {
        Some("transverse momentum is zero")
    } else if point.t == 0.0 {
        Some("t is zero")
    } else if point.u == 0.0 {
        Some("u is zero")
    } else if !weight.is_finite() {
        Some("weight is not finite")
    } else if weight < 0.0 {
        Some("weight is negative")
    } else {
        None
    }
}

/// Run the trials of `range` from `rng` into `sink`.
///
/// `calls` is the size of the whole run (the N weights are divided by), which
/// differs from `range.len` when the run is split across workers. A degenerate
/// accepted event aborts the loop.
pub fn fill_events<R, S>(
    sampler: &PhaseSpaceSampler,
    cuts: &AcceptanceCuts,
    rng: &mut R,
    calls: u64,
    range: TrialRange,
    sink: &mut S,
) -> Result<RunStatistics>
where
    R: Rng + ?Sized,
    S: EventSink + ?Sized,
{
    let mut stats = RunStatistics::default();
    debug!(
        worker = range.worker,
        first_trial = range.start,
        trials = range.len,
        "Filling events"
    );

    for i in 0..range.len {
        let trial = range.start + i;
        let point = sampler.sample(rng);
        stats.trials += 1;

        let observables = match cuts.apply(&point) {
            Ok(obs) => obs,
            Err(reason) => {
                trace!(trial, reason = %reason, "Event rejected");
                stats.reject(reason);
                continue;
            }
        };

        let weight = event_weight(&point, calls);
        if let Some(reason) = degeneracy(&point, &observables, weight) {
            let event = DegenerateEvent {
                trial,
                worker: range.worker,
                reason: reason.into(),
                s: point.s,
                t: point.t,
                u: point.u,
                x1: point.x1,
                x2: point.x2,
                jacobian: point.jacobian,
            };
            error!(
                trial,
                worker = range.worker,
                s = point.s,
                t = point.t,
                u = point.u,
                weight,
                reason,
                "Degenerate accepted event, aborting run"
            );
            return Err(event.into());
        }

        sink.fill(&FillPoint {
            x1: point.x1,
            x2: point.x2,
            q2: SCALE_Q2,
            channel: 0,
            observable: observables.y_pair.abs(),
            order: 0,
            weight,
        });
        stats.accepted += 1;
    }

    Ok(stats)
}
