// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimum bounding box CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use minbox::cli::{Reporter, StageSpinner};
use minbox::config::{SolverSettings, CONFIG_FILE};
use minbox::io;
use minbox::solver::{BoundingBoxSolver, CancelToken, SolveOptions};
use std::io::{BufRead, BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use std::thread;

#[derive(Parser)]
#[command(name = "minbox")]
#[command(about = "Minimum bounding rectangle / box for points, clouds, curves, surfaces and meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./minbox.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the minimum bounding shape of the geometry in one or more files
    Solve {
        /// Input files (.xyz, .txt, .csv, .pts, .stl, .json)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionFlags,

        /// Model absolute tolerance
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Decimal places in the report
        #[arg(short, long, default_value = "4")]
        precision: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Do not remember the options used for the next run
        #[arg(long)]
        no_save: bool,
    },

    /// Show or reset the stored settings
    Config {
        /// Print the effective settings (the default action)
        #[arg(long, conflicts_with = "reset")]
        show: bool,

        /// Restore the default settings
        #[arg(long)]
        reset: bool,
    },

    /// Show version information
    Version,
}

/// Each option toggles between two values; unset flags keep the stored value
#[derive(Args)]
struct OptionFlags {
    /// Fine sampling (18 divisions per axis)
    #[arg(long, overrides_with = "standard")]
    fine: bool,

    /// Standard sampling (10 divisions per axis)
    #[arg(long)]
    standard: bool,

    /// Stop on relative volume change (< 0.01%)
    #[arg(long, overrides_with = "absolute")]
    relative: bool,

    /// Stop on absolute volume change (< tolerance)
    #[arg(long)]
    absolute: bool,

    /// Report intermediate results per stage
    #[arg(long, overrides_with = "quiet")]
    report: bool,

    /// Do not report intermediate results
    #[arg(long)]
    quiet: bool,
}

impl OptionFlags {
    fn resolve(&self, stored: SolveOptions) -> SolveOptions {
        SolveOptions {
            fine_sampling: toggle(self.fine, self.standard, stored.fine_sampling),
            relative_stop: toggle(self.relative, self.absolute, stored.relative_stop),
            report_intermediate: toggle(self.report, self.quiet, stored.report_intermediate),
        }
    }
}

fn toggle(on: bool, off: bool, stored: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        stored
    }
}

fn main() {
    if let Err(err) = run() {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Solve {
            inputs,
            options,
            tolerance,
            precision,
            json,
            no_save,
        } => {
            let mut settings = SolverSettings::load(cli.config.as_deref())?;
            if let Some(tolerance) = tolerance {
                settings.tolerance = *tolerance;
            }
            settings.options = options.resolve(settings.options);
            solve_command(inputs, &settings, *precision, *json)?;

            if !no_save {
                SolverSettings::remember_options(
                    config_path(cli.config.as_deref()),
                    settings.options,
                )?;
            }
        }
        Commands::Config { show, reset } => {
            config_command(cli.config.as_deref(), *reset && !*show)?;
        }
        Commands::Version => {
            println!("minbox v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

fn solve_command(
    inputs: &[PathBuf],
    settings: &SolverSettings,
    precision: usize,
    json: bool,
) -> Result<()> {
    let geometries = io::import_geometry_files(inputs)?;
    let options = settings.options;
    let label = inputs
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let result = if options.report_intermediate && !json {
        let spinner = StageSpinner::new(precision);
        let mut solver = BoundingBoxSolver::new(settings.clone()).with_progress(spinner);
        cancel_on_enter(solver.cancel_token());
        solver.solve(&geometries, options)
    } else {
        BoundingBoxSolver::new(settings.clone()).solve(&geometries, options)
    }
    .with_context(|| format!("Failed to solve {}", label))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        Reporter::report_dispatch(result.kind(), geometries.len());
        Reporter::report_result(&label, &result, precision);
    }

    Ok(())
}

/// Pressing Enter stops refinement; the best result so far is kept
fn cancel_on_enter(cancel: CancelToken) {
    if std::io::stdin().is_terminal() {
        // Detached: the process exits with the watcher still blocked on stdin
        let _watcher = cancel_on_input(BufReader::new(std::io::stdin()), cancel);
    }
}

fn cancel_on_input<R>(mut input: R, cancel: CancelToken) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut line = String::new();
        if matches!(input.read_line(&mut line), Ok(n) if n > 0) {
            cancel.cancel();
        }
    })
}

fn config_command(explicit: Option<&Path>, reset: bool) -> Result<()> {
    if reset {
        let path = config_path(explicit);
        SolverSettings::default().save(&path)?;
        Reporter::success(&format!("Settings reset: {}", path.display()));
        return Ok(());
    }

    let settings = SolverSettings::load(explicit)?;
    Reporter::report_settings(&settings);
    Ok(())
}
