// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the minimum bounding box solver

pub mod progress;
pub mod reporter;

pub use progress::StageSpinner;
pub use reporter::Reporter;
