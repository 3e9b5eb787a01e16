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

//! Benchgate core - benchmark regression classification.
//!
//! Compares two runs of a micro-benchmark suite (a baseline and a current
//! run), classifies each named metric by severity and derives a CI verdict.
//!
//! # Pipeline
//!
//! 1. [`load_result_set`] decodes each document into a [`ResultSet`].
//! 2. [`MetricComparator`] compares latency and throughput metrics;
//!    [`compare_overhead`] compares feature overhead in percentage points.
//! 3. [`classify`] maps each change onto a [`Severity`] using a
//!    [`ThresholdTable`].
//! 4. [`Report::analyze`] runs the sections in fixed order and collects
//!    warnings and critical issues.
//! 5. [`render_text`] / [`render_json`] format the report;
//!    [`GateOutcome`] yields the exit code.
//!
//! # Example
//!
//! ```no_run
//! use benchgate_core::{load_result_set, render_text, GateConfig, Report};
//!
//! # fn main() -> Result<(), benchgate_core::LoadError> {
//! let baseline = load_result_set("baseline.json")?;
//! let current = load_result_set("current.json")?;
//!
//! let report = Report::analyze(&baseline, &current, &GateConfig::default(), "baseline.json", "current.json");
//! println!("{}", render_text(&report));
//! std::process::exit(report.outcome().exit_code().into());
//! # }
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod compare;
pub mod config;
pub mod error;
pub mod exit;
pub mod loader;
pub mod overhead;
pub mod render;
pub mod report;
pub mod thresholds;

pub use classify::{classify, Polarity, Severity};
pub use compare::{change_fraction, ComparisonResult, Measure, MetricComparator};
pub use config::{GateConfig, MetricGroup, MetricSuite};
pub use error::{ConfigError, LoadError};
pub use exit::{GateOutcome, EXIT_INVOCATION_FAILURE};
pub use loader::{
    load_result_set, load_result_set_with_limit, max_file_size, BenchmarkRecord, ResultSet,
    DEFAULT_MAX_FILE_SIZE, MAX_FILE_SIZE_ENV,
};
pub use overhead::{compare_overhead, OverheadPair, OverheadResult};
pub use render::{format_time, render_json, render_text};
pub use report::{MetricEntry, Report};
pub use thresholds::{ThresholdCategory, ThresholdTable, Thresholds, DEFAULT_IMPROVEMENT_CUTOFF};
