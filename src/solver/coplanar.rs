// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planarity and coplanarity classification

use crate::geometry::{Geometry, Plane};
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use tracing::debug;

/// Second-largest over largest variance below which points count as collinear
const COLLINEAR_RATIO: f64 = 1e-12;

/// Least-squares plane through `points`.
///
/// The origin is the centroid, the normal is the direction of least variance
/// and the X axis follows the direction of greatest variance. Returns `None`
/// for fewer than three points, coincident or collinear points, and
/// non-finite input.
pub fn fit_plane(points: &[Point3<f64>]) -> Option<Plane> {
    if points.len() < 3 {
        return None;
    }

    let count = points.len() as f64;
    let centroid = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / count);
    let covariance = points.iter().fold(Matrix3::<f64>::zeros(), |acc, p| {
        let d = p - centroid;
        acc + d * d.transpose()
    });
    if !covariance.iter().all(|v| v.is_finite()) {
        return None;
    }

    let eigen = SymmetricEigen::new(covariance);
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    let [smallest, middle, largest] = order;

    let spread = eigen.eigenvalues[largest];
    if spread <= 0.0 || eigen.eigenvalues[middle] <= spread * COLLINEAR_RATIO {
        return None;
    }

    let normal = eigen.eigenvectors.column(smallest).into_owned();
    let x_hint = eigen.eigenvectors.column(largest).into_owned();
    Plane::from_normal(centroid, &normal, &x_hint)
}

/// Largest unsigned distance of any point from `plane`
pub fn max_deviation(points: &[Point3<f64>], plane: &Plane) -> f64 {
    points
        .iter()
        .map(|p| plane.distance_to(p).abs())
        .fold(0.0, f64::max)
}

/// True when the points lie within `tolerance` of some plane.
///
/// Three or fewer points, coincident points and collinear points always do.
pub fn is_planar(points: &[Point3<f64>], tolerance: f64) -> bool {
    if points.len() <= 3 {
        return true;
    }
    match fit_plane(points) {
        Some(plane) => max_deviation(points, &plane) <= tolerance,
        None => true,
    }
}

/// Find the common plane of all geometries, if there is one.
///
/// Every parametric member (curve, surface, extrusion, brep face) must be
/// planar on its own; the first one that is not settles the answer. The
/// flattened points must then admit a well-conditioned fit with every point
/// within `tolerance` of it.
pub fn classify(geometries: &[Geometry], tolerance: f64) -> Option<Plane> {
    for (index, geometry) in geometries.iter().enumerate() {
        if geometry
            .planar_parts()
            .iter()
            .any(|part| !is_planar(part, tolerance))
        {
            debug!(index, kind = geometry.kind(), "member geometry is not planar");
            return None;
        }
    }

    let points: Vec<Point3<f64>> = geometries
        .iter()
        .flat_map(|g| g.point_set().into_points())
        .collect();

    let plane = fit_plane(&points)?;
    let deviation = max_deviation(&points, &plane);
    if deviation <= tolerance {
        Some(plane)
    } else {
        debug!(deviation, tolerance, "points are not coplanar");
        None
    }
}
