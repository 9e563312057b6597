// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation, run before any phase-space point is drawn.

use crate::config::{CutsConfig, ResourceLimits};
use crate::error::{Result, ValidationError};

/// Validate the sampled partonic energy range.
pub fn validate_energy_range(mmin: f64, mmax: f64) -> Result<()> {
    for (field, val) in [("mmin", mmin), ("mmax", mmax)] {
        if !val.is_finite() {
            return Err(ValidationError::Field {
                field: field.into(),
                message: format!("must be finite, got {}", val),
            }
            .into());
        }
        if val <= 0.0 {
            return Err(ValidationError::Field {
                field: field.into(),
                message: format!("must be positive, got {}", val),
            }
            .into());
        }
    }

    if mmin >= mmax {
        return Err(ValidationError::PhysicsConstraint(format!(
            "mmin ({}) must be below mmax ({})",
            mmin, mmax
        ))
        .into());
    }

    Ok(())
}

/// Validate acceptance cut thresholds.
///
/// A strictly positive pT cut is required: it is what keeps t and u away from
/// the collinear singularity of the matrix element.
pub fn validate_cuts(cuts: &CutsConfig) -> Result<()> {
    for (field, val) in [
        ("pt_min", cuts.pt_min),
        ("y_max", cuts.y_max),
        ("m_min", cuts.m_min),
        ("m_max", cuts.m_max),
    ] {
        if val.is_nan() {
            return Err(ValidationError::Field {
                field: field.into(),
                message: "contains NaN".into(),
            }
            .into());
        }
    }

    if cuts.pt_min <= 0.0 || cuts.pt_min.is_infinite() {
        return Err(ValidationError::Field {
            field: "pt_min".into(),
            message: format!(
                "must be positive and finite to exclude forward scattering, got {}",
                cuts.pt_min
            ),
        }
        .into());
    }

    if cuts.y_max <= 0.0 {
        return Err(ValidationError::Field {
            field: "y_max".into(),
            message: format!("must be positive, got {}", cuts.y_max),
        }
        .into());
    }

    if cuts.m_min < 0.0 || cuts.m_min >= cuts.m_max {
        return Err(ValidationError::PhysicsConstraint(format!(
            "invariant-mass window [{}, {}] is empty",
            cuts.m_min, cuts.m_max
        ))
        .into());
    }

    Ok(())
}

/// Validate histogram bin edges against the resource limits.
pub fn validate_bin_edges(edges: &[f64], limits: &ResourceLimits) -> Result<()> {
    validate_edge_layout(edges)?;

    let bins = (edges.len() - 1) as u64;
    if bins > limits.max_bins {
        return Err(ValidationError::ResourceLimit {
            resource: "bins".into(),
            limit: limits.max_bins,
            requested: bins,
        }
        .into());
    }

    Ok(())
}

/// Validate the shape of a bin-edge list.
///
/// Edges must be finite, strictly increasing, and describe at least one bin.
pub fn validate_edge_layout(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(ValidationError::BinEdges(format!(
            "need at least two edges, got {}",
            edges.len()
        ))
        .into());
    }

    for (i, edge) in edges.iter().enumerate() {
        if !edge.is_finite() {
            return Err(ValidationError::BinEdges(format!(
                "edge {} is not finite ({})",
                i, edge
            ))
            .into());
        }
    }

    for (i, pair) in edges.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(ValidationError::BinEdges(format!(
                "edges must be strictly increasing, but edge {} ({}) <= edge {} ({})",
                i + 1,
                pair[1],
                i,
                pair[0]
            ))
            .into());
        }
    }

    Ok(())
}

/// Validate the sample size and worker count.
pub fn validate_run(calls: u64, workers: usize, limits: &ResourceLimits) -> Result<()> {
    if calls == 0 {
        return Err(ValidationError::Field {
            field: "calls".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if calls > limits.max_calls {
        return Err(ValidationError::ResourceLimit {
            resource: "calls".into(),
            limit: limits.max_calls,
            requested: calls,
        }
        .into());
    }

    if workers == 0 {
        return Err(ValidationError::Field {
            field: "workers".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if workers as u64 > limits.max_workers {
        return Err(ValidationError::ResourceLimit {
            resource: "workers".into(),
            limit: limits.max_workers,
            requested: workers as u64,
        }
        .into());
    }

    Ok(())
}
