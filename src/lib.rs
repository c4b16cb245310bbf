// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minbox
//!
//! Minimum bounding rectangle / box search for points, point clouds, curves,
//! surfaces, extrusions, breps and meshes. Planar (or coplanar) input yields
//! the smallest-area rectangle in its plane; anything else yields the
//! smallest-volume oriented box found by staged rotation sampling.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod solver;
pub mod utils;

pub use config::SolverSettings;
pub use error::SolveError;
pub use geometry::{BoundingBox, Geometry, OrientedBox, Plane, PointSet, Rectangle};
pub use solver::{
    combined_min_bb, BoundingBoxSolver, BoundingShape, CancelToken, ProgressSink, SearchKind,
    SolveOptions, SolveResult, StageReport,
};

use anyhow::Result;
use std::path::Path;

/// Solve the geometry in one file with default settings
pub fn solve_file(path: impl AsRef<Path>, options: SolveOptions) -> Result<SolveResult> {
    let geometries = io::import_geometry_file(path)?;
    Ok(combined_min_bb(&geometries, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_square() {
        let geometries = vec![Geometry::curve(vec![
            nalgebra::Point3::new(0.0, 0.0, 0.0),
            nalgebra::Point3::new(2.0, 0.0, 0.0),
            nalgebra::Point3::new(2.0, 1.0, 0.0),
            nalgebra::Point3::new(0.0, 1.0, 0.0),
        ])];
        let result = combined_min_bb(&geometries, SolveOptions::default()).unwrap();
        assert!(result.is_planar());
        assert!((result.measure - 2.0).abs() < 1e-9);
    }
}
