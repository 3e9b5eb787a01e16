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

//! Command-line argument surface.

use crate::commands::{self, CompareOptions, OutputFormat};
use crate::error::CliError;
use clap::Parser;
use std::path::PathBuf;

/// Benchgate - benchmark regression gate for CI
///
/// Compares a current benchmark run against a baseline, classifies each
/// metric as OK, IMPROVEMENT, WARNING or CRITICAL, and prints a report.
///
/// # Exit codes
///
/// With `--exit-on-regression`: `0` clean, `1` warnings, `2` critical.
/// Without it the gate always exits `0` after reporting. Invocation
/// failures (unreadable inputs, bad config, unwritable output, usage
/// errors) exit `3`.
///
/// # Examples
///
/// ```bash
/// # Print the report
/// benchgate baseline.json current.json
///
/// # Fail the CI job on regressions
/// benchgate baseline.json current.json --exit-on-regression
///
/// # Custom thresholds, JSON report to a file
/// benchgate baseline.json current.json -c gate.yaml -f json -o report.json
/// ```
#[derive(Parser, Debug)]
#[command(name = "benchgate")]
#[command(author, version, about = "Compare benchmark results and detect performance regressions", long_about = None)]
pub struct Cli {
    /// Baseline benchmark results (JSON)
    #[arg(value_name = "BASELINE")]
    pub baseline: PathBuf,

    /// Current benchmark results (JSON)
    #[arg(value_name = "CURRENT")]
    pub current: PathBuf,

    /// Output report to file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exit with non-zero code if regressions detected
    #[arg(long)]
    pub exit_on_regression: bool,

    /// Gate configuration (JSON or YAML) overriding thresholds and benchmark names
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    /// Execute the comparison.
    ///
    /// # Returns
    ///
    /// The process exit code on success.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<u8, CliError> {
        commands::compare(&CompareOptions {
            baseline: self.baseline,
            current: self.current,
            output: self.output,
            exit_on_regression: self.exit_on_regression,
            config: self.config,
            format: self.format,
        })
    }
}
