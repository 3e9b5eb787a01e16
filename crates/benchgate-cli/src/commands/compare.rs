// Dweve Benchgate - Benchmark Regression Gate
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Compare command - baseline vs current regression gate

use super::write_output;
use crate::error::CliError;
use benchgate_core::{load_result_set, render_json, render_text, GateConfig, Report};
use clap::ValueEnum;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Options for a single comparison.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Baseline benchmark results
    pub baseline: PathBuf,
    /// Current benchmark results
    pub current: PathBuf,
    /// Write the report here instead of stdout
    pub output: Option<PathBuf>,
    /// Map the gate outcome onto the exit code
    pub exit_on_regression: bool,
    /// Optional JSON/YAML gate configuration
    pub config: Option<PathBuf>,
    /// Report format
    pub format: OutputFormat,
}

/// Compare two benchmark runs and emit the report.
///
/// Both documents are loaded before any comparison runs. The report goes to
/// `options.output` (followed by a confirmation line on stdout) or to stdout.
///
/// # Returns
///
/// The process exit code: the gate outcome's code when
/// `exit_on_regression` is set, `0` otherwise.
///
/// # Errors
///
/// Returns `Err` if the configuration or either document cannot be loaded,
/// or the report cannot be written.
///
/// # Examples
///
/// ```no_run
/// use benchgate_cli::commands::{compare, CompareOptions};
///
/// # fn main() -> Result<(), benchgate_cli::error::CliError> {
/// let code = compare(&CompareOptions {
///     baseline: "baseline.json".into(),
///     current: "current.json".into(),
///     exit_on_regression: true,
///     ..CompareOptions::default()
/// })?;
/// std::process::exit(code.into());
/// # }
/// ```
pub fn compare(options: &CompareOptions) -> Result<u8, CliError> {
    let config = match &options.config {
        Some(path) => {
            debug!(config = %path.display(), "loading gate configuration");
            GateConfig::load(path)?
        }
        None => GateConfig::default(),
    };

    info!(
        baseline = %options.baseline.display(),
        current = %options.current.display(),
        "comparing benchmark runs"
    );
    let baseline = load_result_set(&options.baseline)?;
    let current = load_result_set(&options.current)?;

    let report = Report::analyze(
        &baseline,
        &current,
        &config,
        options.baseline.display().to_string(),
        options.current.display().to_string(),
    );

    let rendered = match options.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => render_json(&report)?,
    };

    match &options.output {
        Some(path) => {
            write_output(&rendered, Some(path.as_path()))?;
            println!("Report written to {}", path.display());
        }
        None => write_output(&rendered, None)?,
    }

    let code = report.outcome().exit_code_if(options.exit_on_regression);
    if code != 0 {
        eprintln!(
            "\n{}",
            format!("Exiting with code {code} due to performance issues").yellow()
        );
    }
    Ok(code)
}
