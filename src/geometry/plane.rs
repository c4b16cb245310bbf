// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Oriented frames with value-semantics rotations

use nalgebra::{Point3, Rotation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// An oriented 3D frame: an origin plus three orthonormal axes.
///
/// The axes are stored as a unit quaternion, so every rotation keeps them
/// unit-length and mutually orthogonal. Rotations never mutate; they return
/// a new plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3<f64>,
    orientation: UnitQuaternion<f64>,
}

impl Plane {
    pub fn new(origin: Point3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            origin,
            orientation,
        }
    }

    /// World XY frame at the origin
    pub fn world_xy() -> Self {
        Self::new(Point3::origin(), UnitQuaternion::identity())
    }

    /// World YZ frame at the origin: X along world Y, Y along world Z,
    /// normal along world X.
    pub fn world_yz() -> Self {
        let basis = [Vector3::y(), Vector3::z(), Vector3::x()];
        let rotation = Rotation3::from_basis_unchecked(&basis);
        Self::new(Point3::origin(), UnitQuaternion::from_rotation_matrix(&rotation))
    }

    /// Build a plane from a normal and a preferred X direction.
    ///
    /// The X direction is projected onto the plane; returns `None` when the
    /// normal is zero or the X direction is parallel to it.
    pub fn from_normal(
        origin: Point3<f64>,
        normal: &Vector3<f64>,
        x_hint: &Vector3<f64>,
    ) -> Option<Self> {
        let z = normal.try_normalize(f64::EPSILON)?;
        let x = (x_hint - z * x_hint.dot(&z)).try_normalize(f64::EPSILON)?;
        let y = z.cross(&x);
        let rotation = Rotation3::from_basis_unchecked(&[x, y, z]);
        Some(Self::new(origin, UnitQuaternion::from_rotation_matrix(&rotation)))
    }

    pub fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.orientation
    }

    pub fn x_axis(&self) -> Vector3<f64> {
        self.orientation * Vector3::x()
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.orientation * Vector3::y()
    }

    /// Plane normal
    pub fn z_axis(&self) -> Vector3<f64> {
        self.orientation * Vector3::z()
    }

    /// Same orientation, different origin
    pub fn with_origin(&self, origin: Point3<f64>) -> Self {
        Self::new(origin, self.orientation)
    }

    /// Rotate about a world-space axis passing through `center`
    pub fn rotated_about(
        &self,
        angle: f64,
        axis: &Unit<Vector3<f64>>,
        center: &Point3<f64>,
    ) -> Self {
        let rotation = UnitQuaternion::from_axis_angle(axis, angle);
        let origin = center + rotation * (self.origin - center);
        let mut orientation = rotation * self.orientation;
        orientation.renormalize();
        Self::new(origin, orientation)
    }

    /// Rotate about one of the plane's own axes through its origin.
    ///
    /// `local_axis` is expressed in the plane's frame, so `Vector3::z_axis()`
    /// spins the plane about its normal.
    pub fn rotated_local(&self, angle: f64, local_axis: &Unit<Vector3<f64>>) -> Self {
        let mut orientation =
            self.orientation * UnitQuaternion::from_axis_angle(local_axis, angle);
        orientation.renormalize();
        Self::new(self.origin, orientation)
    }

    /// Rotate about the plane's own Z axis
    pub fn yawed(&self, angle: f64) -> Self {
        self.rotated_local(angle, &Vector3::z_axis())
    }

    /// Rotate about the plane's own Y axis
    pub fn rolled(&self, angle: f64) -> Self {
        self.rotated_local(angle, &Vector3::y_axis())
    }

    /// Rotate about the plane's own X axis
    pub fn pitched(&self, angle: f64) -> Self {
        self.rotated_local(angle, &Vector3::x_axis())
    }

    /// Express a world point in plane coordinates
    pub fn to_local(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.orientation.inverse_transform_vector(&(point - self.origin)))
    }

    /// Map a plane-coordinate point back to world space
    pub fn to_world(&self, local: &Point3<f64>) -> Point3<f64> {
        self.origin + self.orientation * local.coords
    }

    /// Signed distance of a point from the plane
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        self.z_axis().dot(&(point - self.origin))
    }

    /// Check that the axes are unit length and mutually orthogonal
    pub fn is_orthonormal(&self, epsilon: f64) -> bool {
        let (x, y, z) = (self.x_axis(), self.y_axis(), self.z_axis());
        (x.norm() - 1.0).abs() < epsilon
            && (y.norm() - 1.0).abs() < epsilon
            && (z.norm() - 1.0).abs() < epsilon
            && x.dot(&y).abs() < epsilon
            && y.dot(&z).abs() < epsilon
            && z.dot(&x).abs() < epsilon
            && (x.cross(&y) - z).norm() < epsilon
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::world_xy()
    }
}
