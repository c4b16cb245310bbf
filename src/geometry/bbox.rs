// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::Plane;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// The axes are those of whatever frame the points were expressed in; for a
/// plane-aligned box they are the plane's local X, Y and Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    /// Extent of world-space points expressed in `plane`'s local frame
    pub fn in_plane<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>, plane: &Plane) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(&plane.to_local(point));
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// False for the empty box (no points seen)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        if !self.is_valid() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Area of the XY footprint
    pub fn area(&self) -> f64 {
        let size = self.size();
        size.x * size.y
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// The eight corners: bottom face (min Z) counter-clockwise from `min`,
    /// then the top face in the same order.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_bounding_box() {
        let mut bbox = BoundingBox::empty();
        bbox.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        bbox.expand_to_include(&Point3::new(-1.0, -2.0, -3.0));

        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.volume(), 48.0);
        assert_eq!(bbox.area(), 8.0);
    }

    #[test]
    fn test_empty_box_has_no_extent() {
        let bbox = BoundingBox::empty();
        assert!(!bbox.is_valid());
        assert_eq!(bbox.volume(), 0.0);
        assert_eq!(bbox.area(), 0.0);
    }

    #[test]
    fn test_single_point_is_valid_and_flat() {
        let point = Point3::new(4.0, 5.0, 6.0);
        let bbox = BoundingBox::from_points([&point]);
        assert!(bbox.is_valid());
        assert_eq!(bbox.volume(), 0.0);
    }

    #[test]
    fn test_in_plane_tightens_rotated_square() {
        // Unit square rotated 45 degrees about Z
        let plane = Plane::world_xy().yawed(FRAC_PI_4);
        let square: Vec<Point3<f64>> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| plane.to_world(&Point3::new(x, y, 0.0)))
            .collect();

        let world = BoundingBox::from_points(&square);
        let local = BoundingBox::in_plane(&square, &plane);

        assert_relative_eq!(world.area(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(local.area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_corners_order() {
        let a = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let corners = a.corners();
        assert_eq!(corners[0], a.min);
        assert_eq!(corners[6], a.max);
        assert_eq!(corners[2], Point3::new(1.0, 1.0, 0.0));
    }
}
