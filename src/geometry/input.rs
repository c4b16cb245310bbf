// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Input geometry kinds and their point extraction

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// The points contributed by one input geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<Point3<f64>>,
}

impl PointSet {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }
}

impl From<Vec<Point3<f64>>> for PointSet {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// A geometry the solver accepts.
///
/// Parametric kinds (curves, surfaces, extrusions, brep faces) carry the
/// control points of their NURBS representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Point { location: Point3<f64> },
    PointCloud { points: Vec<Point3<f64>> },
    Curve { control_points: Vec<Point3<f64>> },
    Surface { control_points: Vec<Point3<f64>> },
    Extrusion { control_points: Vec<Point3<f64>> },
    Brep { faces: Vec<Vec<Point3<f64>>> },
    Mesh { vertices: Vec<Point3<f64>> },
}

impl Geometry {
    pub fn point(x: f64, y: f64, z: f64) -> Self {
        Self::Point {
            location: Point3::new(x, y, z),
        }
    }

    pub fn point_cloud(points: Vec<Point3<f64>>) -> Self {
        Self::PointCloud { points }
    }

    pub fn curve(control_points: Vec<Point3<f64>>) -> Self {
        Self::Curve { control_points }
    }

    pub fn surface(control_points: Vec<Point3<f64>>) -> Self {
        Self::Surface { control_points }
    }

    pub fn mesh(vertices: Vec<Point3<f64>>) -> Self {
        Self::Mesh { vertices }
    }

    /// Human-readable kind name
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point { .. } => "point",
            Self::PointCloud { .. } => "point cloud",
            Self::Curve { .. } => "curve",
            Self::Surface { .. } => "surface",
            Self::Extrusion { .. } => "extrusion",
            Self::Brep { .. } => "brep",
            Self::Mesh { .. } => "mesh",
        }
    }

    /// Flatten this geometry into its contributing points
    pub fn point_set(&self) -> PointSet {
        match self {
            Self::Point { location } => PointSet::new(vec![*location]),
            Self::PointCloud { points } => PointSet::new(points.clone()),
            Self::Curve { control_points }
            | Self::Surface { control_points }
            | Self::Extrusion { control_points } => PointSet::new(control_points.clone()),
            Self::Brep { faces } => PointSet::new(faces.iter().flatten().copied().collect()),
            Self::Mesh { vertices } => PointSet::new(vertices.clone()),
        }
    }

    /// Parts that must be planar on their own before the geometry can take
    /// part in a coplanar set. Points, clouds and meshes have none.
    pub fn planar_parts(&self) -> Vec<&[Point3<f64>]> {
        match self {
            Self::Curve { control_points }
            | Self::Surface { control_points }
            | Self::Extrusion { control_points } => vec![control_points.as_slice()],
            Self::Brep { faces } => faces.iter().map(Vec::as_slice).collect(),
            Self::Point { .. } | Self::PointCloud { .. } | Self::Mesh { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_set_extraction() {
        let brep = Geometry::Brep {
            faces: vec![
                vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
                vec![Point3::new(0.0, 1.0, 0.0)],
            ],
        };
        assert_eq!(brep.point_set().len(), 3);
        assert_eq!(brep.planar_parts().len(), 2);

        let point = Geometry::point(1.0, 2.0, 3.0);
        assert_eq!(point.point_set().points(), &[Point3::new(1.0, 2.0, 3.0)]);
        assert!(point.planar_parts().is_empty());
    }

    #[test]
    fn test_mesh_has_no_planar_parts() {
        let mesh = Geometry::mesh(vec![Point3::origin(); 4]);
        assert!(mesh.planar_parts().is_empty());
        assert_eq!(mesh.kind(), "mesh");
    }

    #[test]
    fn test_non_finite_points_detected() {
        let set = PointSet::new(vec![Point3::new(0.0, f64::NAN, 0.0)]);
        assert!(!set.is_finite());
    }

    #[test]
    fn test_geometry_json_shape() {
        let json = r#"[
            {"type": "point", "location": [1.0, 2.0, 3.0]},
            {"type": "curve", "control_points": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]}
        ]"#;
        let geometries: Vec<Geometry> = serde_json::from_str(json).unwrap();
        assert_eq!(geometries[0], Geometry::point(1.0, 2.0, 3.0));
        assert_eq!(geometries[1].kind(), "curve");
    }
}
