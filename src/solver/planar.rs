// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimum-area rectangle search within a plane

use super::{Monitor, SearchOutcome};
use crate::geometry::{BoundingBox, Plane};
use crate::utils::math::symmetric_steps;
use nalgebra::Point3;
use std::f64::consts::FRAC_PI_2;

/// Angular divisions per sweep; the first sweep moves in 1 degree steps
pub const PLANAR_DIVISIONS: usize = 90;

/// Safety cap on the number of sweeps
pub const PLANAR_MAX_STAGES: usize = 10;

/// Spin `plane` about its normal through `window` radians centered on its
/// current orientation, in `divisions` equal steps.
///
/// The unrotated plane is the starting best, and a sample replaces the best
/// only when its area is strictly smaller, so the result is never worse than
/// the input. On equal areas the current plane beats every sample, and among
/// samples the earliest (most negative angle) wins.
pub fn sweep(
    points: &[Point3<f64>],
    plane: &Plane,
    window: f64,
    divisions: usize,
) -> (Plane, BoundingBox) {
    let mut best_plane = *plane;
    let mut best_extent = BoundingBox::in_plane(points, plane);
    let mut best_area = best_extent.area();

    for angle in symmetric_steps(window, divisions + 1) {
        let candidate = plane.yawed(angle);
        let extent = BoundingBox::in_plane(points, &candidate);
        let area = extent.area();
        if area < best_area {
            best_area = area;
            best_plane = candidate;
            best_extent = extent;
        }
    }

    (best_plane, best_extent)
}

/// Repeated sweeps with a window shrinking by `1 / PLANAR_DIVISIONS` each
/// stage, until the area changes by less than `stop_threshold`, the stage cap
/// is hit, or the monitor reports cancellation.
pub(crate) fn minimum_rectangle(
    points: &[Point3<f64>],
    start: Plane,
    stop_threshold: f64,
    monitor: &mut Monitor<'_, '_>,
) -> SearchOutcome {
    let mut plane = start;
    let mut extent = BoundingBox::in_plane(points, &plane);
    let mut area = extent.area();
    let mut window = FRAC_PI_2;
    let mut stages = 0;
    let mut cancelled = false;

    monitor.report(stages, area);

    while stages < PLANAR_MAX_STAGES {
        let (best_plane, best_extent) = sweep(points, &plane, window, PLANAR_DIVISIONS);
        let new_area = best_extent.area();
        stages += 1;
        monitor.report(stages, new_area);

        let change = (area - new_area).abs();
        plane = best_plane;
        extent = best_extent;
        area = new_area;

        if change < stop_threshold {
            break;
        }
        window /= PLANAR_DIVISIONS as f64;

        if monitor.is_cancelled() {
            cancelled = true;
            break;
        }
    }

    SearchOutcome {
        plane,
        extent,
        measure: area,
        stages,
        cancelled,
    }
}
