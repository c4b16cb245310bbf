// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry file importer

use super::parse_points;
use crate::geometry::Geometry;
use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use std::fs::{self, File};
use std::path::Path;
use stl_io::read_stl;

/// Import a geometry file.
///
/// * `.xyz`, `.txt`, `.csv`, `.pts` - one point cloud
/// * `.stl` - one mesh (its vertices)
/// * `.json` - a list of tagged geometries
pub fn import_geometry_file(path: impl AsRef<Path>) -> Result<Vec<Geometry>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xyz" | "txt" | "csv" | "pts" => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read point file: {}", path.display()))?;
            let points = parse_points(&source)
                .with_context(|| format!("Failed to parse point file: {}", path.display()))?;
            Ok(vec![Geometry::point_cloud(points)])
        }
        "stl" => Ok(vec![load_stl(path)?]),
        "json" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open geometry file: {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("Failed to parse geometry file: {}", path.display()))
        }
        _ => bail!(
            "Unsupported geometry file '{}' (expected .xyz, .txt, .csv, .pts, .stl or .json)",
            path.display()
        ),
    }
}

/// Import several files into one geometry list
pub fn import_geometry_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Geometry>> {
    let mut geometries = Vec::new();
    for path in paths {
        geometries.extend(import_geometry_file(path)?);
    }
    Ok(geometries)
}

/// Load an STL file as a mesh of its (deduplicated) vertices
fn load_stl(path: &Path) -> Result<Geometry> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open STL file: {}", path.display()))?;
    let stl = read_stl(&mut file).context("Failed to read STL file")?;

    let vertices = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    Ok(Geometry::mesh(vertices))
}
