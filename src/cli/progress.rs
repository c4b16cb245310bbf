// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Terminal progress for intermediate stage reports

use crate::solver::{ProgressSink, SearchKind, StageReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that prints one line per completed search stage
pub struct StageSpinner {
    bar: ProgressBar,
    precision: usize,
}

impl StageSpinner {
    pub fn new(precision: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message("Calculating... press Enter to stop refining.");
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar, precision }
    }

    /// One line per stage, in the wording the solver's users know
    pub fn describe(report: &StageReport, precision: usize) -> String {
        match (report.kind, report.stage) {
            (SearchKind::Planar, 0) => format!("Initial area: {:.*}", precision, report.measure),
            (SearchKind::Planar, stage) => {
                format!("Refine stage {} area: {:.*}", stage, precision, report.measure)
            }
            (SearchKind::Spatial, 0) => {
                format!("Initial pass 0, volume: {:.*}", precision, report.measure)
            }
            (SearchKind::Spatial, stage) => {
                format!("Refine pass {}, volume: {:.*}", stage, precision, report.measure)
            }
        }
    }
}

impl ProgressSink for StageSpinner {
    fn on_stage(&mut self, report: &StageReport) {
        self.bar.println(Self::describe(report, self.precision));
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
