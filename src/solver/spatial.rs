// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimum-volume oriented box search
//!
//! A coarse sample of orientations covering the positive octant is refined
//! by successively narrower yaw/roll/pitch grids centered on the best
//! orientation found so far.

use super::{Monitor, SearchOutcome};
use crate::geometry::{BoundingBox, Plane};
use crate::utils::math::{linspace, symmetric_steps};
use nalgebra::{Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Samples per axis for standard sampling (1000 candidates per stage)
pub const STANDARD_DIVISIONS: usize = 10;

/// Samples per axis for fine sampling (5832 candidates per stage)
pub const FINE_DIVISIONS: usize = 18;

/// Safety cap on the number of refinement stages
pub const SPATIAL_MAX_STAGES: usize = 20;

/// Angular span kept from one stage to the next
const SPAN_REDUCTION: f64 = 0.1;

/// Cartesian product of three independent angle axes.
///
/// Iteration runs the outer axis slowest and the inner axis fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleGrid {
    outer: Vec<f64>,
    middle: Vec<f64>,
    inner: Vec<f64>,
}

impl AngleGrid {
    pub fn new(outer: Vec<f64>, middle: Vec<f64>, inner: Vec<f64>) -> Self {
        Self {
            outer,
            middle,
            inner,
        }
    }

    /// `divisions` angles from 0 to 90 degrees on every axis
    pub fn octant(divisions: usize) -> Self {
        let angles = linspace(0.0, FRAC_PI_2, divisions);
        Self::new(angles.clone(), angles.clone(), angles)
    }

    /// `divisions` angles from `-span / 2` to `span / 2` on every axis
    pub fn symmetric(span: f64, divisions: usize) -> Self {
        let angles = symmetric_steps(span, divisions);
        Self::new(angles.clone(), angles.clone(), angles)
    }

    pub fn len(&self) -> usize {
        self.outer.len() * self.middle.len() * self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.outer.iter().flat_map(move |&a| {
            self.middle
                .iter()
                .flat_map(move |&b| self.inner.iter().map(move |&c| [a, b, c]))
        })
    }
}

/// Candidate frames covering the positive octant.
///
/// Each candidate is the world YZ frame turned about world X, then world -Y,
/// then world Z, all through the origin; the Z angle varies slowest.
pub fn octant_planes(divisions: usize) -> Vec<Plane> {
    let start = Plane::world_yz();
    let origin = Point3::origin();
    let about_x = Vector3::x_axis();
    let about_neg_y = Unit::new_normalize(-Vector3::y());
    let about_z = Vector3::z_axis();

    AngleGrid::octant(divisions)
        .iter()
        .map(|[z_angle, y_angle, x_angle]| {
            start
                .rotated_about(x_angle, &about_x, &origin)
                .rotated_about(y_angle, &about_neg_y, &origin)
                .rotated_about(z_angle, &about_z, &origin)
        })
        .collect()
}

/// Candidate frames around `base`: yaw about its Z (slowest), then roll
/// about the yawed Y, then pitch about the rolled X (fastest).
pub fn refinement_planes(base: &Plane, span: f64, divisions: usize) -> Vec<Plane> {
    AngleGrid::symmetric(span, divisions)
        .iter()
        .map(|[yaw, roll, pitch]| base.yawed(yaw).rolled(roll).pitched(pitch))
        .collect()
}

/// How the 3D search decides it has converged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StopRule {
    /// Stage improvement below `factor` times the previous volume
    Relative { factor: f64 },
    /// Stage improvement below an absolute tolerance
    Absolute { tolerance: f64 },
}

impl StopRule {
    pub fn is_converged(&self, previous: f64, current: f64) -> bool {
        let improvement = previous - current;
        match *self {
            Self::Relative { factor } => previous <= 0.0 || improvement < factor * previous,
            Self::Absolute { tolerance } => improvement < tolerance,
        }
    }
}

/// A frame together with its box
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    plane: Plane,
    extent: BoundingBox,
    volume: f64,
}

impl Candidate {
    fn evaluate(points: &[Point3<f64>], plane: Plane) -> Self {
        let extent = BoundingBox::in_plane(points, &plane);
        Self {
            plane,
            extent,
            volume: extent.volume(),
        }
    }
}

/// Keep `current` unless some candidate has a strictly smaller volume; the
/// first such minimum wins.
pub(crate) fn best_of(
    points: &[Point3<f64>],
    candidates: impl IntoIterator<Item = Plane>,
    current: Candidate,
) -> Candidate {
    candidates.into_iter().fold(current, |best, plane| {
        let candidate = Candidate::evaluate(points, plane);
        if candidate.volume < best.volume {
            candidate
        } else {
            best
        }
    })
}

pub(crate) fn minimum_box(
    points: &[Point3<f64>],
    divisions: usize,
    rule: StopRule,
    monitor: &mut Monitor<'_, '_>,
) -> SearchOutcome {
    let initial = Candidate::evaluate(points, Plane::world_xy());
    let mut best = best_of(points, octant_planes(divisions), initial);
    let mut span = FRAC_PI_2;
    let mut stages = 0;
    let mut cancelled = false;

    monitor.report(stages, best.volume);

    while stages < SPATIAL_MAX_STAGES {
        let previous = best.volume;
        span *= SPAN_REDUCTION;
        best = best_of(points, refinement_planes(&best.plane, span, divisions), best);
        stages += 1;
        monitor.report(stages, best.volume);

        if rule.is_converged(previous, best.volume) {
            break;
        }
        if monitor.is_cancelled() {
            cancelled = true;
            break;
        }
    }

    SearchOutcome {
        plane: best.plane,
        extent: best.extent,
        measure: best.volume,
        stages,
        cancelled,
    }
}
