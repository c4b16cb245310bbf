// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Solver error types

use thiserror::Error;

/// Result alias for solver operations
pub type Result<T> = std::result::Result<T, SolveError>;

/// Caller contract violations. Degenerate but valid input (a single point,
/// collinear points) is never an error.
#[derive(Debug, Error, PartialEq)]
pub enum SolveError {
    /// No geometries, or geometries without a single point
    #[error("no input points: at least one geometry with one point is required")]
    EmptyInput,

    /// A coordinate is NaN or infinite
    #[error("geometry {index} ({kind}) contains a non-finite coordinate")]
    NonFinitePoint { index: usize, kind: &'static str },

    /// Model tolerance is negative or not finite
    #[error("invalid tolerance {0}: must be finite and non-negative")]
    InvalidTolerance(f64),

    /// Another solver setting is out of range
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl SolveError {
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}
