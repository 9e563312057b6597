// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Destinations for weighted events.
//!
//! An interpolation grid records each event as
//! `fill(x1, x2, Q², channel, observable, order, weight)` so that PDFs can be
//! convolved afterwards. [`EventSink`] is that call's shape; [`Histogram`]
//! is the in-crate implementation that only keeps the observable and weight.

use super::Histogram;

/// One weighted contribution, laid out as an interpolation-grid fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillPoint {
    /// Momentum fraction of the first incoming photon.
    pub x1: f64,
    /// Momentum fraction of the second incoming photon.
    pub x2: f64,
    /// Factorisation/renormalisation scale squared (GeV²).
    pub q2: f64,
    /// Partonic luminosity channel index.
    pub channel: usize,
    /// Value of the binned observable.
    pub observable: f64,
    /// Perturbative order index (0 = leading order).
    pub order: usize,
    /// Event weight, already divided by the number of calls.
    pub weight: f64,
}

/// Something that accepts weighted events.
pub trait EventSink {
    /// Record one event.
    fn fill(&mut self, point: &FillPoint);
}

impl EventSink for Histogram {
    fn fill(&mut self, point: &FillPoint) {
        self.add(point.observable, point.weight);
    }
}

/// Keeps every event, e.g. to inspect or replay accepted phase-space points.
impl EventSink for Vec<FillPoint> {
    fn fill(&mut self, point: &FillPoint) {
        self.push(*point);
    }
}
