// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hadronic phase-space generator.
//!
//! Maps (r1, r2, r3) ∈ (0,1) × [0,1)² onto (τ, y, cos θ):
//!
//!   τ = τ0^r1,   y = τ^(1−r2),   cos θ = 2·r3 − 1
//!
//! with τ0 = (mmin/mmax)². Sampling τ logarithmically concentrates points near
//! threshold, where the cross section is largest. The Jacobian of the map is
//! τ·ln²(τ0)·r1 · 2 · 2π (angle θ and the flat azimuth φ).

use std::f64::consts::PI;

use rand::distr::Open01;
use rand::Rng;

use super::types::PhaseSpacePoint;
use crate::error::Result;
use crate::validation::validate_energy_range;

/// Phase-space sampler for a fixed partonic energy range.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpaceSampler {
    mmin: f64,
    mmax: f64,
    smax: f64,
    tau0: f64,
    ln_tau0_sq: f64,
}

impl PhaseSpaceSampler {
    /// Create a sampler for partonic energies between `mmin` and `mmax` (GeV).
    pub fn new(mmin: f64, mmax: f64) -> Result<Self> {
        validate_energy_range(mmin, mmax)?;

        let tau0 = (mmin / mmax).powi(2);
        let ln_tau0 = tau0.ln();

        Ok(Self {
            mmin,
            mmax,
            smax: mmax * mmax,
            tau0,
            ln_tau0_sq: ln_tau0 * ln_tau0,
        })
    }

    /// Lower edge of the partonic energy range.
    pub fn mmin(&self) -> f64 {
        self.mmin
    }

    /// Upper edge of the partonic energy range.
    pub fn mmax(&self) -> f64 {
        self.mmax
    }

    /// τ0 = (mmin/mmax)², the lower bound on x1·x2.
    pub fn tau0(&self) -> f64 {
        self.tau0
    }

    /// Map three uniform numbers to a phase-space point.
    ///
    /// `r1` must lie in (0, 1) for a non-zero Jacobian; `r2` and `r3` in [0, 1).
    pub fn map(&self, r1: f64, r2: f64, r3: f64) -> PhaseSpacePoint {
        let tau = self.tau0.powf(r1);
        let y = tau.powf(1.0 - r2);
        let x1 = y;
        let x2 = tau / y;
        let s = tau * self.smax;

        let mut jacobian = tau * self.ln_tau0_sq * r1;

        // θ integration in the partonic centre-of-mass frame
        let cos_theta = 2.0 * r3 - 1.0;
        jacobian *= 2.0;

        let t = -0.5 * s * (1.0 - cos_theta);
        let u = -0.5 * s * (1.0 + cos_theta);

        // φ integration
        jacobian *= 2.0 * PI;

        PhaseSpacePoint {
            s,
            t,
            u,
            x1,
            x2,
            jacobian,
        }
    }

    /// Draw one phase-space point.
    ///
    /// Exactly three numbers are consumed per call, so trial `k` of a run
    /// depends only on the generator state after `3k` draws.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PhaseSpacePoint {
        let r1: f64 = rng.sample(Open01);
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();
        self.map(r1, r2, r3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn z_peak_sampler() -> PhaseSpaceSampler {
        PhaseSpaceSampler::new(10.0, 7000.0).unwrap()
    }

    #[test]
    fn test_rejects_invalid_range() {
        assert!(PhaseSpaceSampler::new(7000.0, 10.0).is_err());
        assert!(PhaseSpaceSampler::new(10.0, 10.0).is_err());
        assert!(PhaseSpaceSampler::new(0.0, 10.0).is_err());
        assert!(PhaseSpaceSampler::new(-5.0, 10.0).is_err());
    }

    #[test]
    fn test_tau0() {
        let sampler = z_peak_sampler();
        assert_relative_eq!(sampler.tau0(), (10.0 / 7000.0_f64).powi(2), max_relative = 1e-15);
    }

    #[test]
    fn test_map_r1_one_reaches_threshold() {
        // r1 → 1 gives τ = τ0, i.e. s = mmin²
        let sampler = z_peak_sampler();
        let p = sampler.map(1.0, 0.5, 0.5);
        assert_relative_eq!(p.s, 100.0, max_relative = 1e-12);
        assert_relative_eq!(p.tau(), sampler.tau0(), max_relative = 1e-12);
    }

    #[test]
    fn test_map_central_angle() {
        // cos θ = 0 splits s evenly between t and u
        let sampler = z_peak_sampler();
        let p = sampler.map(0.3, 0.2, 0.5);
        assert_relative_eq!(p.t, -0.5 * p.s, max_relative = 1e-15);
        assert_relative_eq!(p.u, -0.5 * p.s, max_relative = 1e-15);
    }

    #[test]
    fn test_map_jacobian_closed_form() {
        let sampler = z_peak_sampler();
        let (r1, r2, r3) = (0.25, 0.75, 0.1);
        let p = sampler.map(r1, r2, r3);

        let tau0 = sampler.tau0();
        let tau = tau0.powf(r1);
        let expected = tau * tau0.ln().powi(2) * r1 * 2.0 * 2.0 * PI;
        assert_relative_eq!(p.jacobian, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_map_r2_zero_symmetric_fractions() {
        // r2 = 0 gives y = τ, so x1 = τ and x2 = 1
        let sampler = z_peak_sampler();
        let p = sampler.map(0.4, 0.0, 0.3);
        assert_relative_eq!(p.x1, p.tau(), max_relative = 1e-12);
        assert_relative_eq!(p.x2, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_sampled_points_satisfy_invariants() {
        let sampler = z_peak_sampler();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let tau0 = sampler.tau0();

        for _ in 0..10_000 {
            let p = sampler.sample(&mut rng);

            assert!(p.mandelstam_sum().abs() <= 1e-9 * p.s, "s + t + u = {}", p.mandelstam_sum());
            assert!(p.x1 > 0.0 && p.x1 <= 1.0, "x1 = {}", p.x1);
            assert!(p.x2 > 0.0 && p.x2 <= 1.0, "x2 = {}", p.x2);
            assert!(p.tau() >= tau0 * (1.0 - 1e-12) && p.tau() <= 1.0 + 1e-12);
            assert!(p.jacobian > 0.0 && p.jacobian.is_finite());
            assert!(p.t <= 0.0 && p.u <= 0.0);
        }
    }

    #[test]
    fn test_sample_is_deterministic_for_seed() {
        let sampler = z_peak_sampler();
        let mut a = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut b = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }
}
