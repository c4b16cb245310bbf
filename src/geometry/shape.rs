// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Oriented result shapes: the planar rectangle and the 3D box

use super::{BoundingBox, Plane};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Flat rectangle lying in a plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub plane: Plane,
    /// Extent in the plane's local frame; only X and Y matter
    pub extent: BoundingBox,
}

impl Rectangle {
    pub fn new(plane: Plane, extent: BoundingBox) -> Self {
        Self { plane, extent }
    }

    pub fn width(&self) -> f64 {
        self.extent.size().x
    }

    pub fn height(&self) -> f64 {
        self.extent.size().y
    }

    pub fn area(&self) -> f64 {
        self.extent.area()
    }

    /// World-space corners on the plane, counter-clockwise about its normal
    pub fn corners(&self) -> [Point3<f64>; 4] {
        let (lo, hi) = (self.extent.min, self.extent.max);
        [
            Point3::new(lo.x, lo.y, 0.0),
            Point3::new(hi.x, lo.y, 0.0),
            Point3::new(hi.x, hi.y, 0.0),
            Point3::new(lo.x, hi.y, 0.0),
        ]
        .map(|corner| self.plane.to_world(&corner))
    }

    /// Closed polyline through the corners (first corner repeated)
    pub fn polyline(&self) -> Vec<Point3<f64>> {
        let corners = self.corners();
        let mut polyline = corners.to_vec();
        polyline.push(corners[0]);
        polyline
    }
}

/// Box aligned with an arbitrary frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub plane: Plane,
    pub extent: BoundingBox,
}

impl OrientedBox {
    pub fn new(plane: Plane, extent: BoundingBox) -> Self {
        Self { plane, extent }
    }

    /// Edge lengths along the frame's X, Y and Z
    pub fn dimensions(&self) -> Vector3<f64> {
        self.extent.size()
    }

    pub fn volume(&self) -> f64 {
        self.extent.volume()
    }

    pub fn center(&self) -> Point3<f64> {
        self.plane.to_world(&self.extent.center())
    }

    /// World-space corners in [`BoundingBox::corners`] order
    pub fn corners(&self) -> [Point3<f64>; 8] {
        self.extent.corners().map(|corner| self.plane.to_world(&corner))
    }

    /// Check if a point is inside the box, allowing `tolerance` slack
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let local = self.plane.to_local(point);
        let (lo, hi) = (self.extent.min, self.extent.max);
        local.x >= lo.x - tolerance
            && local.x <= hi.x + tolerance
            && local.y >= lo.y - tolerance
            && local.y <= hi.y + tolerance
            && local.z >= lo.z - tolerance
            && local.z <= hi.z + tolerance
    }
}
