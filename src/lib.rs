// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Drell-Yan Monte Carlo
//!
//! Leading-order Monte Carlo estimate of the photon-initiated Drell-Yan cross
//! section γγ → ℓ⁺ℓ⁻, binned in the absolute rapidity of the lepton pair.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         CLI (clap) / Config              │
//! ├─────────────────────────────────────────┤
//! │              Integrator                  │
//! │   trials split across rayon workers      │
//! ├──────────────────┬──────────────────────┤
//! │ Phase-space      │  Matrix element      │
//! │ sampler          │  |M|²(s, t, u)       │
//! ├──────────────────┴──────────────────────┤
//! │     Cuts → EventSink (Histogram)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`phase_space`]: Random numbers to partonic kinematics
//! - [`matrix_element`]: Squared matrix element of γγ → ℓ⁺ℓ⁻
//! - [`integrator`]: Cuts, event weights, parallel fill and convergence scan
//! - [`histogram`]: Weighted histogram and the event-sink seam
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod histogram;
pub mod integrator;
pub mod matrix_element;
pub mod phase_space;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
