// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Solver configuration system

use crate::error::SolveError;
use crate::solver::{SolveOptions, StopRule};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "minbox.toml";

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Model absolute tolerance, used for planarity and absolute stopping
    pub tolerance: f64,
    /// Planar search stops when the area changes by less than this times the tolerance
    pub planar_stop_factor: f64,
    /// Relative 3D stop: improvement below this fraction of the previous volume
    pub relative_stop_factor: f64,
    /// Options used by the last run, offered as the next run's defaults
    pub options: SolveOptions,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            planar_stop_factor: 0.01,
            relative_stop_factor: 0.0001,
            options: SolveOptions {
                fine_sampling: false,
                relative_stop: true,
                report_intermediate: true,
            },
        }
    }
}

impl SolverSettings {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let settings: SolverSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(settings)
    }

    /// Load configuration from `path` (or `minbox.toml` when present), then
    /// apply environment variable overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE)?,
            None => Self::default(),
        };

        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(tolerance) = std::env::var("MINBOX_TOLERANCE") {
            self.tolerance = tolerance
                .parse()
                .with_context(|| format!("Invalid MINBOX_TOLERANCE: {}", tolerance))?;
        }

        if let Ok(fine) = std::env::var("MINBOX_FINE_SAMPLING") {
            self.options.fine_sampling = fine.parse().unwrap_or(self.options.fine_sampling);
        }

        if let Ok(relative) = std::env::var("MINBOX_RELATIVE_STOP") {
            self.options.relative_stop = relative.parse().unwrap_or(self.options.relative_stop);
        }

        if let Ok(report) = std::env::var("MINBOX_REPORT") {
            self.options.report_intermediate =
                report.parse().unwrap_or(self.options.report_intermediate);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Store `options` as the next run's defaults.
    ///
    /// Only the options change: everything else is taken from the file as
    /// written (or the defaults when there is none), so environment and
    /// command line overrides of a single run are never persisted.
    pub fn remember_options(path: impl AsRef<Path>, options: SolveOptions) -> Result<()> {
        let path = path.as_ref();
        let mut stored = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        stored.options = options;
        stored.save(path)
    }

    /// Reject settings the searches cannot run with
    pub fn validate(&self) -> std::result::Result<(), SolveError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SolveError::InvalidTolerance(self.tolerance));
        }
        if !self.planar_stop_factor.is_finite() || self.planar_stop_factor < 0.0 {
            return Err(SolveError::invalid_params(format!(
                "planar_stop_factor must be finite and non-negative, got {}",
                self.planar_stop_factor
            )));
        }
        if !self.relative_stop_factor.is_finite() || self.relative_stop_factor < 0.0 {
            return Err(SolveError::invalid_params(format!(
                "relative_stop_factor must be finite and non-negative, got {}",
                self.relative_stop_factor
            )));
        }
        Ok(())
    }

    /// Area change below which the planar search stops
    pub fn planar_stop_threshold(&self) -> f64 {
        self.planar_stop_factor * self.tolerance
    }

    /// Stopping rule for the 3D search
    pub fn stop_rule(&self, relative: bool) -> StopRule {
        if relative {
            StopRule::Relative {
                factor: self.relative_stop_factor,
            }
        } else {
            StopRule::Absolute {
                tolerance: self.tolerance,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = SolverSettings::default();
        assert_eq!(settings.tolerance, 0.001);
        assert!(settings.options.relative_stop);
        assert!(!settings.options.fine_sampling);
        assert!(settings.validate().is_ok());
        assert!((settings.planar_stop_threshold() - 0.00001).abs() < 1e-15);
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let file = NamedTempFile::with_suffix(".toml")?;
        let mut settings = SolverSettings::default();
        settings.tolerance = 0.01;
        settings.options.fine_sampling = true;

        settings.save(file.path())?;
        let loaded = SolverSettings::from_file(file.path())?;
        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn test_remember_options_keeps_stored_values() -> Result<()> {
        let file = NamedTempFile::with_suffix(".toml")?;
        let stored = SolverSettings {
            tolerance: 0.02,
            ..Default::default()
        };
        stored.save(file.path())?;

        let options = SolveOptions {
            fine_sampling: true,
            relative_stop: false,
            report_intermediate: false,
        };
        SolverSettings::remember_options(file.path(), options)?;

        let loaded = SolverSettings::from_file(file.path())?;
        assert_eq!(loaded.tolerance, 0.02);
        assert_eq!(loaded.options, options);
        Ok(())
    }

    #[test]
    fn test_remember_options_creates_missing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        let options = SolveOptions {
            fine_sampling: true,
            ..Default::default()
        };

        SolverSettings::remember_options(&path, options)?;
        let loaded = SolverSettings::from_file(&path)?;
        assert_eq!(loaded.tolerance, SolverSettings::default().tolerance);
        assert_eq!(loaded.options, options);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let settings: SolverSettings = toml::from_str("tolerance = 0.5\n")?;
        assert_eq!(settings.tolerance, 0.5);
        assert_eq!(settings.relative_stop_factor, 0.0001);
        Ok(())
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = SolverSettings {
            tolerance: -1.0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(SolveError::InvalidTolerance(-1.0)));

        let settings = SolverSettings {
            relative_stop_factor: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SolveError::InvalidParams(_))));
    }

    #[test]
    fn test_stop_rule_selection() {
        let settings = SolverSettings::default();
        assert_eq!(
            settings.stop_rule(true),
            StopRule::Relative { factor: 0.0001 }
        );
        assert_eq!(
            settings.stop_rule(false),
            StopRule::Absolute { tolerance: 0.001 }
        );
    }
}
