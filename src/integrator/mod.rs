// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Event accumulation and cross-section assembly.
//!
//! Each of the N trials draws a phase-space point, computes the lepton
//! observables, and applies the acceptance cuts. Surviving events are weighted
//! by the Jacobian, the squared matrix element and the conversion to pb, and
//! filled at |y_ll|:
//!
//! ```text
//! σ_bin = Σ_{accepted, |y_ll| ∈ bin}  J · (ħc)² / N · |M|²(s, u, t)
//! ```
//!
//! Cuts are applied in the order pT, |y_ll|, lepton |y|, M. The pT cut comes
//! first so that nothing downstream divides by a vanishing pT.
//!
//! # Example
//!
//! ```no_run
//! use drell_yan_mc::integrator::Integrator;
//! use drell_yan_mc::Config;
//!
//! let integrator = Integrator::from_config(&Config::default())?;
//! let result = integrator.run()?;
//! println!("{}", result.to_table());
//! # Ok::<(), drell_yan_mc::Error>(())
//! ```

pub mod cuts;
pub mod integrate;
pub mod observables;
pub mod parallel;
pub mod scan;
pub mod types;

pub use cuts::{AcceptanceCuts, Rejection};
pub use integrate::{event_weight, fill_events, Integrator};
pub use observables::LeptonObservables;
pub use parallel::TrialRange;
pub use scan::{ConvergenceScan, ScanPoint};
pub use types::{BinResult, CrossSectionResult, RunStatistics};

/// (ħc)² in pb·GeV², converting GeV⁻² to pb.
pub const GEV2_TO_PB: f64 = 389_379_372.1;

/// Factorisation scale Q² = (90 GeV)² passed to grid fills.
pub const SCALE_Q2: f64 = 8100.0;
