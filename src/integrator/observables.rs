// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Lepton-pair observables derived from a phase-space point.

use crate::phase_space::PhaseSpacePoint;

/// Transverse momentum of either lepton: pT² = t·u / s.
pub fn transverse_momentum(point: &PhaseSpacePoint) -> f64 {
    (point.t * point.u / point.s).sqrt()
}

/// Invariant mass of the lepton pair.
pub fn invariant_mass(point: &PhaseSpacePoint) -> f64 {
    point.s.sqrt()
}

/// Rapidity of the lepton pair in the hadronic frame, ½·ln(x1/x2).
pub fn pair_rapidity(point: &PhaseSpacePoint) -> f64 {
    0.5 * (point.x1 / point.x2).ln()
}

/// Absolute rapidities (y⁺, y⁻) of the two leptons.
///
/// In the partonic frame each lepton has rapidity ±arccosh(M / 2pT); boosting
/// by the pair rapidity gives the hadronic-frame values. Requires `pt > 0`.
///
/// M / 2pT ≥ 1 analytically; rounding at 90° scattering can put it just
/// below 1, so it is clamped before the arccosh.
pub fn lepton_rapidities(mass: f64, pt: f64, y_pair: f64) -> (f64, f64) {
    let y_star = (0.5 * mass / pt).max(1.0).acosh();
    ((y_pair + y_star).abs(), (y_pair - y_star).abs())
}

/// All observables of an accepted event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeptonObservables {
    /// Lepton transverse momentum (GeV).
    pub pt: f64,
    /// Pair invariant mass (GeV).
    pub mass: f64,
    /// Pair rapidity (signed).
    pub y_pair: f64,
    /// |y| of the first lepton.
    pub y_plus: f64,
    /// |y| of the second lepton.
    pub y_minus: f64,
}

impl LeptonObservables {
    /// Compute every observable. `point` must have non-zero pT.
    pub fn from_point(point: &PhaseSpacePoint) -> Self {
        let pt = transverse_momentum(point);
        let mass = invariant_mass(point);
        let y_pair = pair_rapidity(point);
        let (y_plus, y_minus) = lepton_rapidities(mass, pt, y_pair);
        Self {
            pt,
            mass,
            y_pair,
            y_plus,
            y_minus,
        }
    }
}
