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

//! Result aggregation.
//!
//! Runs every comparator in fixed section order (latency, overhead, memory)
//! and collects warning and critical messages along the way. Rendering lives
//! in [`crate::render`] and only reads the finished [`Report`].

use crate::classify::Severity;
use crate::compare::{ComparisonResult, MetricComparator};
use crate::config::{GateConfig, MetricGroup};
use crate::exit::GateOutcome;
use crate::loader::ResultSet;
use crate::overhead::{compare_overhead, OverheadResult};
use crate::render::format_time;
use serde::Serialize;
use tracing::{info, warn};

/// A comparison together with its display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    /// Short label (name with configured prefix and suffix removed).
    pub label: String,
    /// The classified comparison.
    #[serde(flatten)]
    pub result: ComparisonResult,
}

/// Classified results of one baseline/current comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// How the baseline run is identified in the report header.
    pub baseline: String,
    /// How the current run is identified in the report header.
    pub current: String,
    /// Latency comparisons.
    pub core_latency: Vec<MetricEntry>,
    /// Overhead comparison, `None` when components are missing.
    pub safety_overhead: Option<OverheadResult>,
    /// Memory throughput comparisons.
    pub memory: Vec<MetricEntry>,
    /// Warning messages in section order.
    pub warnings: Vec<String>,
    /// Critical messages in section order.
    pub critical_issues: Vec<String>,
}

impl Report {
    /// Compares `current` against `baseline` under `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use benchgate_core::{BenchmarkRecord, GateConfig, GateOutcome, Report, ResultSet};
    ///
    /// let baseline = ResultSet::new(vec![BenchmarkRecord::new("BM_MakeMove_ShortChain_mean", 100.0)]);
    /// let current = ResultSet::new(vec![BenchmarkRecord::new("BM_MakeMove_ShortChain_mean", 130.0)]);
    ///
    /// let report = Report::analyze(&baseline, &current, &GateConfig::default(), "base.json", "cur.json");
    /// assert_eq!(report.outcome(), GateOutcome::Critical);
    /// assert_eq!(report.outcome().exit_code(), 2);
    /// ```
    pub fn analyze(
        baseline: &ResultSet,
        current: &ResultSet,
        config: &GateConfig,
        baseline_label: impl Into<String>,
        current_label: impl Into<String>,
    ) -> Self {
        let comparator = MetricComparator::new(&config.thresholds);
        let suite = &config.suite;

        let mut report = Self {
            baseline: baseline_label.into(),
            current: current_label.into(),
            core_latency: Vec::new(),
            safety_overhead: None,
            memory: Vec::new(),
            warnings: Vec::new(),
            critical_issues: Vec::new(),
        };

        let latency = comparator.compare_latency(baseline, current, &suite.core_latency.names);
        for result in latency {
            report.flag(
                result.severity,
                format!(
                    "{} increased by {:.1}% ({} → {})",
                    result.metric_name,
                    result.change_percent(),
                    format_time(result.baseline_value),
                    format_time(result.current_value)
                ),
            );
            report.core_latency.push(entry(&suite.core_latency, result));
        }

        let overhead =
            compare_overhead(baseline, current, &suite.safety_overhead, &config.thresholds);
        match &overhead {
            Some(overhead) => report.flag(
                overhead.severity,
                format!(
                    "Safety overhead increased by {:.1}% ({:.1}% → {:.1}%)",
                    overhead.overhead_delta * 100.0,
                    overhead.baseline_overhead * 100.0,
                    overhead.current_overhead * 100.0
                ),
            ),
            None => warn!("safety overhead data not available"),
        }
        report.safety_overhead = overhead;

        let memory =
            comparator.compare_throughput(baseline, current, &suite.memory_throughput.names);
        for result in memory {
            report.flag(
                result.severity,
                format!(
                    "{} throughput decreased by {:.1}%",
                    result.metric_name,
                    result.change_fraction.abs() * 100.0
                ),
            );
            report.memory.push(entry(&suite.memory_throughput, result));
        }

        info!(
            outcome = ?report.outcome(),
            critical = report.critical_issues.len(),
            warnings = report.warnings.len(),
            "benchmark comparison finished"
        );
        report
    }

    /// Files `detail` under the list its severity selects, if any.
    fn flag(&mut self, severity: Severity, detail: String) {
        match severity {
            Severity::Critical => self.critical_issues.push(format!("CRITICAL: {detail}")),
            Severity::Warning => self.warnings.push(format!("WARNING: {detail}")),
            Severity::Ok | Severity::Improvement => {}
        }
    }

    /// Gate outcome derived from the collected issues.
    pub fn outcome(&self) -> GateOutcome {
        GateOutcome::from_issues(&self.critical_issues, &self.warnings)
    }

    /// Most urgent severity across all sections, `None` if nothing was compared.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.core_latency
            .iter()
            .chain(&self.memory)
            .map(|e| e.result.severity)
            .chain(self.safety_overhead.iter().map(|o| o.severity))
            .max()
    }
}

fn entry(group: &MetricGroup, result: ComparisonResult) -> MetricEntry {
    MetricEntry {
        label: group.label(&result.metric_name),
        result,
    }
}
