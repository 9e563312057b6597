// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Phase-space generation for photon-photon → lepton-pair scattering.
//!
//! The hadronic phase space of a 2 → 2 process with massless final states
//! is parametrised by the momentum fractions (x1, x2) of the incoming photons
//! and the scattering angle θ in the partonic centre-of-mass frame. The
//! sampler maps the unit cube onto it and returns the Jacobian of the map so
//! that the plain Monte Carlo average stays unbiased.
//!
//! # Example
//!
//! ```
//! use drell_yan_mc::phase_space::PhaseSpaceSampler;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let sampler = PhaseSpaceSampler::new(10.0, 7000.0).unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let point = sampler.sample(&mut rng);
//! assert!(point.jacobian > 0.0);
//! ```
//!
//! # References
//!
//! - Byckling, E. & Kajantie, K. (1973). "Particle Kinematics." Wiley.
//! - Carli, T. et al. (2010). Eur. Phys. J. C 66, 503. DOI: 10.1140/epjc/s10052-010-1255-0

pub mod sampler;
pub mod types;

pub use sampler::PhaseSpaceSampler;
pub use types::PhaseSpacePoint;
