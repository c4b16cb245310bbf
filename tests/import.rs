// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! File import through to a solve

use anyhow::Result;
use approx::assert_relative_eq;
use minbox::{io, solve_file, SearchKind, SolveOptions};
use std::io::Write;
use stl_io::{Normal, Triangle, Vertex};
use tempfile::NamedTempFile;

fn options() -> SolveOptions {
    SolveOptions {
        fine_sampling: false,
        relative_stop: true,
        report_intermediate: false,
    }
}

#[test]
fn test_solve_point_file() -> Result<()> {
    let mut file = NamedTempFile::with_suffix(".xyz")?;
    writeln!(file, "# rectangle 4 x 2 in the XY plane")?;
    writeln!(file, "0 0 0")?;
    writeln!(file, "4 0 0")?;
    writeln!(file, "4 2 0")?;
    writeln!(file, "0 2 0")?;
    writeln!(file, "2 1 0")?;

    let result = solve_file(file.path(), options())?;
    assert_eq!(result.kind(), SearchKind::Planar);
    assert_relative_eq!(result.measure, 8.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_solve_csv_cloud() -> Result<()> {
    let mut file = NamedTempFile::with_suffix(".csv")?;
    for (x, y, z) in [
        (0.0, 0.0, 0.0),
        (2.0, 0.0, 0.0),
        (0.0, 3.0, 0.0),
        (0.0, 0.0, 1.0),
        (2.0, 3.0, 1.0),
    ] {
        writeln!(file, "{}, {}, {}", x, y, z)?;
    }

    let result = solve_file(file.path(), options())?;
    assert_eq!(result.kind(), SearchKind::Spatial);
    assert!(result.measure <= 6.0 + 1e-9);
    Ok(())
}

#[test]
fn test_solve_stl_mesh() -> Result<()> {
    let corners = [
        [0.0f32, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ];
    let faces = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
    let triangles: Vec<Triangle> = faces
        .iter()
        .map(|f| Triangle {
            normal: Normal::new([0.0, 0.0, 0.0]),
            vertices: [
                Vertex::new(corners[f[0]]),
                Vertex::new(corners[f[1]]),
                Vertex::new(corners[f[2]]),
            ],
        })
        .collect();

    let mut file = NamedTempFile::with_suffix(".stl")?;
    stl_io::write_stl(&mut file, triangles.iter())?;
    file.flush()?;

    let geometries = io::import_geometry_file(file.path())?;
    assert_eq!(geometries.len(), 1);
    assert_eq!(geometries[0].kind(), "mesh");
    assert_eq!(geometries[0].point_set().len(), 4);

    let result = solve_file(file.path(), options())?;
    assert!(!result.is_planar());
    assert!(result.measure > 0.0 && result.measure <= 1.0 + 1e-9);
    Ok(())
}

#[test]
fn test_solve_json_geometries() -> Result<()> {
    let mut file = NamedTempFile::with_suffix(".json")?;
    write!(
        file,
        r#"[
            {{"type": "curve", "control_points": [[0, 0, 5], [3, 0, 5], [3, 1, 5]]}},
            {{"type": "point", "location": [0, 1, 5]}}
        ]"#
    )?;

    let result = solve_file(file.path(), options())?;
    assert!(result.is_planar());
    assert_relative_eq!(result.measure, 3.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_files_combine_into_one_selection() -> Result<()> {
    let mut lower = NamedTempFile::with_suffix(".txt")?;
    writeln!(lower, "0 0 0\n1 0 0\n0 1 0")?;
    let mut upper = NamedTempFile::with_suffix(".txt")?;
    writeln!(upper, "0 0 2\n1 1 2")?;

    let geometries = io::import_geometry_files(&[lower.path(), upper.path()])?;
    assert_eq!(geometries.len(), 2);

    let result = minbox::combined_min_bb(&geometries, options())?;
    assert_eq!(result.kind(), SearchKind::Spatial);
    Ok(())
}

#[test]
fn test_bad_point_line_reports_location() -> Result<()> {
    let mut file = NamedTempFile::with_suffix(".xyz")?;
    writeln!(file, "0 0 0")?;
    writeln!(file, "1 oops 0")?;

    let err = solve_file(file.path(), options()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("line 2"), "unexpected error: {}", message);
    Ok(())
}
