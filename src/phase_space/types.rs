// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Phase-space point type.

/// One sampled point of the γγ → ℓ⁺ℓ⁻ phase space.
///
/// Massless 2 → 2 kinematics: s + t + u = 0, with s > 0 and t, u ≤ 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSpacePoint {
    /// Partonic centre-of-mass energy squared (GeV²).
    pub s: f64,
    /// Momentum transfer to ℓ⁻ (GeV²).
    pub t: f64,
    /// Momentum transfer to ℓ⁺ (GeV²).
    pub u: f64,
    /// Momentum fraction of the first incoming photon.
    pub x1: f64,
    /// Momentum fraction of the second incoming photon.
    pub x2: f64,
    /// Change-of-variables factor from the unit cube.
    pub jacobian: f64,
}

impl PhaseSpacePoint {
    /// τ = x1·x2 = s / s_max.
    pub fn tau(&self) -> f64 {
        self.x1 * self.x2
    }

    /// s + t + u, zero up to rounding.
    pub fn mandelstam_sum(&self) -> f64 {
        self.s + self.t + self.u
    }
}
