// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimum bounding box solver
//!
//! Classifies the input as planar/coplanar or not, then runs either the
//! in-plane rectangle search or the 3D oriented box search.

mod coplanar;
mod planar;
mod spatial;

pub use coplanar::{classify, fit_plane, is_planar, max_deviation};
pub use planar::{sweep, PLANAR_DIVISIONS, PLANAR_MAX_STAGES};
pub use spatial::{
    octant_planes, refinement_planes, AngleGrid, StopRule, FINE_DIVISIONS, SPATIAL_MAX_STAGES,
    STANDARD_DIVISIONS,
};

use crate::config::SolverSettings;
use crate::error::{Result, SolveError};
use crate::geometry::{BoundingBox, Geometry, OrientedBox, Plane, Rectangle};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Caller-selected search options; every combination is valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// 18 samples per axis instead of 10 in the 3D search
    pub fine_sampling: bool,
    /// Stop the 3D search on relative rather than absolute improvement
    pub relative_stop: bool,
    /// Emit a [`StageReport`] per stage to the progress sink
    pub report_intermediate: bool,
}

impl SolveOptions {
    /// Samples per rotation axis in the 3D search
    pub fn divisions(&self) -> usize {
        if self.fine_sampling {
            FINE_DIVISIONS
        } else {
            STANDARD_DIVISIONS
        }
    }
}

/// Which search produced a report or result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Planar,
    Spatial,
}

impl SearchKind {
    pub fn measure_name(&self) -> &'static str {
        match self {
            Self::Planar => "area",
            Self::Spatial => "volume",
        }
    }
}

/// Progress of one search stage. Stage 0 is the starting estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageReport {
    pub kind: SearchKind,
    pub stage: usize,
    pub measure: f64,
}

/// Receiver of intermediate stage reports
pub trait ProgressSink {
    fn on_stage(&mut self, report: &StageReport);
}

impl<F> ProgressSink for F
where
    F: FnMut(&StageReport),
{
    fn on_stage(&mut self, report: &StageReport) {
        self(report)
    }
}

/// Cooperative cancellation flag, shared between clones.
///
/// The solver looks at it once per refinement stage and returns the best
/// result found so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// The minimal shape found
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BoundingShape {
    Rectangle(Rectangle),
    Box(OrientedBox),
}

impl BoundingShape {
    pub fn kind(&self) -> SearchKind {
        match self {
            Self::Rectangle(_) => SearchKind::Planar,
            Self::Box(_) => SearchKind::Spatial,
        }
    }

    /// World-space corners: 4 for a rectangle, 8 for a box
    pub fn corners(&self) -> Vec<Point3<f64>> {
        match self {
            Self::Rectangle(rect) => rect.corners().to_vec(),
            Self::Box(obb) => obb.corners().to_vec(),
        }
    }

    pub fn plane(&self) -> &Plane {
        match self {
            Self::Rectangle(rect) => &rect.plane,
            Self::Box(obb) => &obb.plane,
        }
    }
}

/// Output of one solve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    pub shape: BoundingShape,
    /// Area for a rectangle, volume for a box
    pub measure: f64,
    /// Refinement stages completed
    pub stages: usize,
    pub elapsed: Duration,
    /// True when the search ended early through the cancel token
    pub cancelled: bool,
}

impl SolveResult {
    pub fn kind(&self) -> SearchKind {
        self.shape.kind()
    }

    pub fn is_planar(&self) -> bool {
        self.kind() == SearchKind::Planar
    }

    pub fn rectangle(&self) -> Option<&Rectangle> {
        match &self.shape {
            BoundingShape::Rectangle(rect) => Some(rect),
            BoundingShape::Box(_) => None,
        }
    }

    pub fn oriented_box(&self) -> Option<&OrientedBox> {
        match &self.shape {
            BoundingShape::Box(obb) => Some(obb),
            BoundingShape::Rectangle(_) => None,
        }
    }
}

/// Best frame of a finished search
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchOutcome {
    pub plane: Plane,
    pub extent: BoundingBox,
    pub measure: f64,
    pub stages: usize,
    pub cancelled: bool,
}

/// Per-search hooks: stage reporting and cancellation
pub(crate) struct Monitor<'m, 'p> {
    kind: SearchKind,
    cancel: &'m CancelToken,
    progress: Option<&'m mut (dyn ProgressSink + 'p)>,
}

impl<'m, 'p> Monitor<'m, 'p> {
    pub fn new(
        kind: SearchKind,
        cancel: &'m CancelToken,
        progress: Option<&'m mut (dyn ProgressSink + 'p)>,
    ) -> Self {
        Self {
            kind,
            cancel,
            progress,
        }
    }

    #[cfg(test)]
    pub fn silent(kind: SearchKind, cancel: &'m CancelToken) -> Self {
        Self::new(kind, cancel, None)
    }

    pub fn report(&mut self, stage: usize, measure: f64) {
        debug!(kind = ?self.kind, stage, measure, "search stage complete");
        if let Some(sink) = self.progress.as_deref_mut() {
            let report = StageReport {
                kind: self.kind,
                stage,
                measure,
            };
            ProgressSink::on_stage(sink, &report);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Minimum bounding rectangle / box solver
pub struct BoundingBoxSolver<'p> {
    settings: SolverSettings,
    cancel: CancelToken,
    progress: Option<Box<dyn ProgressSink + 'p>>,
}

impl<'p> BoundingBoxSolver<'p> {
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            settings,
            cancel: CancelToken::new(),
            progress: None,
        }
    }

    /// Share an externally owned cancel token
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Receive stage reports when `report_intermediate` is set
    pub fn with_progress(mut self, sink: impl ProgressSink + 'p) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Find the minimal rectangle (planar input) or box (anything else)
    pub fn solve(&mut self, geometries: &[Geometry], options: SolveOptions) -> Result<SolveResult> {
        let start = Instant::now();
        self.settings.validate()?;
        let points = collect_points(geometries)?;
        let tolerance = self.settings.tolerance;

        let progress = if options.report_intermediate {
            self.progress.as_deref_mut()
        } else {
            None
        };

        let (shape, outcome) = match classify(geometries, tolerance) {
            Some(plane) => {
                if geometries.len() == 1 {
                    info!(kind = geometries[0].kind(), "object is planar, searching for minimum rectangle");
                } else {
                    info!(objects = geometries.len(), "objects are coplanar, searching for minimum rectangle");
                }
                let mut monitor = Monitor::new(SearchKind::Planar, &self.cancel, progress);
                let outcome = planar::minimum_rectangle(
                    &points,
                    plane,
                    self.settings.planar_stop_threshold(),
                    &mut monitor,
                );
                (BoundingShape::Rectangle(Rectangle::new(outcome.plane, outcome.extent)), outcome)
            }
            None => {
                if geometries.len() == 1 {
                    info!(kind = geometries[0].kind(), "object is not planar, searching for minimum box");
                } else {
                    info!(objects = geometries.len(), "objects are not coplanar, searching for minimum box");
                }
                let mut monitor = Monitor::new(SearchKind::Spatial, &self.cancel, progress);
                let outcome = spatial::minimum_box(
                    &points,
                    options.divisions(),
                    self.settings.stop_rule(options.relative_stop),
                    &mut monitor,
                );
                (BoundingShape::Box(OrientedBox::new(outcome.plane, outcome.extent)), outcome)
            }
        };

        let result = SolveResult {
            shape,
            measure: outcome.measure,
            stages: outcome.stages,
            elapsed: start.elapsed(),
            cancelled: outcome.cancelled,
        };
        info!(
            kind = ?result.kind(),
            measure = result.measure,
            stages = result.stages,
            cancelled = result.cancelled,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "minimum bounding {} found",
            result.kind().measure_name()
        );
        Ok(result)
    }
}

impl Default for BoundingBoxSolver<'_> {
    fn default() -> Self {
        Self::new(SolverSettings::default())
    }
}

/// Solve with default settings and no progress reporting
pub fn combined_min_bb(geometries: &[Geometry], options: SolveOptions) -> Result<SolveResult> {
    BoundingBoxSolver::default().solve(geometries, options)
}

/// Flatten and validate the input points
fn collect_points(geometries: &[Geometry]) -> Result<Vec<Point3<f64>>> {
    if geometries.is_empty() {
        return Err(SolveError::EmptyInput);
    }

    let mut points = Vec::new();
    for (index, geometry) in geometries.iter().enumerate() {
        let set = geometry.point_set();
        if !set.is_finite() {
            return Err(SolveError::NonFinitePoint {
                index,
                kind: geometry.kind(),
            });
        }
        points.extend(set.into_points());
    }

    if points.is_empty() {
        return Err(SolveError::EmptyInput);
    }
    Ok(points)
}
