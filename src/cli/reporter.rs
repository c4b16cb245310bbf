// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::config::SolverSettings;
use crate::solver::{BoundingShape, SearchKind, SolveOptions, SolveResult};
use colored::*;
use nalgebra::Point3;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Say which search produced the result
    pub fn report_dispatch(kind: SearchKind, objects: usize) {
        Self::report_info(&Self::dispatch_message(kind, objects));
    }

    pub(crate) fn dispatch_message(kind: SearchKind, objects: usize) -> String {
        let message = match (kind, objects) {
            (SearchKind::Planar, 1) => "Selected object is planar",
            (SearchKind::Planar, _) => "All selected objects are coplanar",
            (SearchKind::Spatial, 1) => "Selected object is not planar",
            (SearchKind::Spatial, _) => "Selected objects are not coplanar",
        };
        let search = match kind {
            SearchKind::Planar => "2D planar bounding rectangle",
            SearchKind::Spatial => "3D bounding box",
        };
        format!("{}: computed the {}.", message, search)
    }

    /// Report a finished solve
    pub fn report_result(label: &str, result: &SolveResult, precision: usize) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Input:".bold(), label.cyan());
        println!("{}", "━".repeat(80).bright_black());

        match &result.shape {
            BoundingShape::Rectangle(rect) => {
                println!(
                    "{} {}",
                    "✅".green(),
                    "Minimum bounding rectangle".green().bold()
                );
                Self::print_metric("Area", &format!("{:.*}", precision, result.measure));
                Self::print_metric(
                    "Size",
                    &format!("{:.*} × {:.*}", precision, rect.width(), precision, rect.height()),
                );
                Self::print_corners(&rect.polyline(), precision);
            }
            BoundingShape::Box(obb) => {
                println!("{} {}", "✅".green(), "Minimum bounding box".green().bold());
                let size = obb.dimensions();
                Self::print_metric("Volume", &format!("{:.*}", precision, result.measure));
                Self::print_metric(
                    "Size",
                    &format!(
                        "{:.*} × {:.*} × {:.*}",
                        precision, size.x, precision, size.y, precision, size.z
                    ),
                );
                Self::print_corners(&obb.corners(), precision);
            }
        }

        let stages = if result.cancelled {
            format!("{} (cancelled)", result.stages).yellow()
        } else {
            result.stages.to_string().cyan()
        };
        println!("  {} {}", "Refinement stages:".bright_black(), stages);
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(result.elapsed).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Show the effective settings
    pub fn report_settings(settings: &SolverSettings) {
        println!("{}", "Settings:".bold());
        Self::print_metric("Tolerance", &settings.tolerance.to_string());
        Self::print_metric("Planar stop factor", &settings.planar_stop_factor.to_string());
        Self::print_metric(
            "Relative stop factor",
            &settings.relative_stop_factor.to_string(),
        );
        Self::report_options(&settings.options);
    }

    pub fn report_options(options: &SolveOptions) {
        let sampling = if options.fine_sampling { "Fine" } else { "Standard" };
        let stop = if options.relative_stop {
            "Relative"
        } else {
            "Absolute"
        };
        let reports = if options.report_intermediate { "Yes" } else { "No" };
        Self::print_metric("Sampling", sampling);
        Self::print_metric("StopVal", stop);
        Self::print_metric("ReportIntermedResults", reports);
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_metric(name: &str, value: &str) {
        println!("  {} {}", format!("{}:", name).bright_black(), value.cyan());
    }

    fn print_corners(corners: &[Point3<f64>], precision: usize) {
        println!("  {}", "Corners:".bright_black());
        for corner in corners {
            println!(
                "    ({:.*}, {:.*}, {:.*})",
                precision, corner.x, precision, corner.y, precision, corner.z
            );
        }
    }

    /// Format duration for display
    pub(crate) fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_dispatch_message_describes_finished_search() {
        assert_eq!(
            Reporter::dispatch_message(SearchKind::Planar, 1),
            "Selected object is planar: computed the 2D planar bounding rectangle."
        );
        let message = Reporter::dispatch_message(SearchKind::Spatial, 3);
        assert!(message.starts_with("Selected objects are not coplanar"));
        assert!(!message.contains("launching"));
    }
}
