// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - loading input geometry from files

mod importer;
mod parser;

pub use importer::{import_geometry_file, import_geometry_files};
pub use parser::parse_points;
