// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tree-level squared matrix elements.
//!
//! Ref: Peskin & Schroeder (1995), "An Introduction to Quantum Field Theory", §5.5.

/// Fine-structure constant in the Thomson limit.
pub const ALPHA0: f64 = 1.0 / 137.035_999_11;

/// Spin- and colour-averaged |M|² of γγ → ℓ⁺ℓ⁻ including the 1/(2s) flux factor.
///
///   |M|² / (2s) = α₀² / (2s) · (t/u + u/t)
///
/// The expression is symmetric under t ↔ u. It is singular at t = 0 or u = 0
/// (collinear emission); callers must keep both away from zero, which a
/// positive transverse-momentum cut does.
pub fn photon_photon(s: f64, t: f64, u: f64) -> f64 {
    ALPHA0 * ALPHA0 / 2.0 / s * (t / u + u / t)
}
