// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plain-text point list parser

use anyhow::{bail, Context, Result};
use nalgebra::Point3;

/// Parse one point per line: `x y z`, `x,y,z` or `x; y; z`.
///
/// Blank lines and `#` comments are skipped. Extra columns after the third
/// (normals, colors) are ignored, as scanner exports often carry them.
pub fn parse_points(source: &str) -> Result<Vec<Point3<f64>>> {
    let mut points = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() < 3 {
            bail!(
                "line {}: expected 3 coordinates, found {}",
                line_no,
                fields.len()
            );
        }

        let mut coords = [0.0f64; 3];
        for (slot, field) in coords.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .with_context(|| format!("line {}: invalid coordinate '{}'", line_no, field))?;
        }
        points.push(Point3::new(coords[0], coords[1], coords[2]));
    }

    Ok(points)
}
