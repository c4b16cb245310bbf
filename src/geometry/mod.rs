// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - frames, extents and input geometry

mod bbox;
mod input;
mod plane;
mod shape;

pub use bbox::BoundingBox;
pub use input::{Geometry, PointSet};
pub use plane::Plane;
pub use shape::{OrientedBox, Rectangle};
