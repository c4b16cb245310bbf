// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stored settings across runs

use anyhow::Result;
use minbox::config::{SolverSettings, CONFIG_FILE};
use minbox::SolveOptions;

// The only test in this binary, so setting the environment cannot race
#[test]
fn test_one_run_overrides_are_not_stored() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(CONFIG_FILE);
    SolverSettings::default().save(&path)?;

    std::env::set_var("MINBOX_TOLERANCE", "0.5");
    let loaded = SolverSettings::load(Some(path.as_path()));
    std::env::remove_var("MINBOX_TOLERANCE");

    let mut settings = loaded?;
    assert_eq!(settings.tolerance, 0.5);

    // A --tolerance flag on top of the environment
    settings.tolerance = 2.0;
    settings.options = SolveOptions {
        fine_sampling: true,
        relative_stop: false,
        report_intermediate: false,
    };
    SolverSettings::remember_options(&path, settings.options)?;

    let stored = SolverSettings::from_file(&path)?;
    assert_eq!(stored.tolerance, SolverSettings::default().tolerance);
    assert_eq!(stored.options, settings.options);
    Ok(())
}
