// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Acceptance cuts on the lepton pair.

use std::fmt;

use super::observables::{
    invariant_mass, lepton_rapidities, pair_rapidity, transverse_momentum, LeptonObservables,
};
use crate::config::CutsConfig;
use crate::phase_space::PhaseSpacePoint;

/// Which cut rejected an event. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Lepton pT below the minimum.
    TransverseMomentum,
    /// |y| of the pair above the maximum.
    PairRapidity,
    /// |y| of either lepton above the maximum.
    LeptonRapidity,
    /// Invariant mass outside the window.
    InvariantMass,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rejection::TransverseMomentum => "pT",
            Rejection::PairRapidity => "pair rapidity",
            Rejection::LeptonRapidity => "lepton rapidity",
            Rejection::InvariantMass => "invariant mass",
        };
        f.write_str(name)
    }
}

/// Acceptance cuts with the thresholds of a [`CutsConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceCuts {
    pt_min: f64,
    y_max: f64,
    m_min: f64,
    m_max: f64,
}

impl From<&CutsConfig> for AcceptanceCuts {
    fn from(config: &CutsConfig) -> Self {
        Self {
            pt_min: config.pt_min,
            y_max: config.y_max,
            m_min: config.m_min,
            m_max: config.m_max,
        }
    }
}

impl AcceptanceCuts {
    /// Evaluate the cuts on `point`.
    ///
    /// Every cut is strict: pT > `pt_min`, |y| < `y_max` for the pair and both
    /// leptons, and `m_min` < M < `m_max`. The pT cut runs first, so the
    /// lepton rapidities (which divide by pT) are only computed for points
    /// with pT > `pt_min` > 0.
    pub fn apply(&self, point: &PhaseSpacePoint) -> Result<LeptonObservables, Rejection> {
        let pt = transverse_momentum(point);
        if pt.is_nan() || pt <= self.pt_min {
            return Err(Rejection::TransverseMomentum);
        }

        let y_pair = pair_rapidity(point);
        if y_pair.abs() >= self.y_max {
            return Err(Rejection::PairRapidity);
        }

        let mass = invariant_mass(point);
        let (y_plus, y_minus) = lepton_rapidities(mass, pt, y_pair);
        if y_plus >= self.y_max || y_minus >= self.y_max {
            return Err(Rejection::LeptonRapidity);
        }

        if mass <= self.m_min || mass >= self.m_max {
            return Err(Rejection::InvariantMass);
        }

        Ok(LeptonObservables {
            pt,
            mass,
            y_pair,
            y_plus,
            y_minus,
        })
    }
}
