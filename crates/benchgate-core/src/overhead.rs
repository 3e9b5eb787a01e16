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

//! Feature overhead comparison.
//!
//! Within each run, overhead is the relative CPU-time cost of the feature:
//! `change_fraction(disabled, enabled)`. Runs are then compared by the
//! percentage-point delta `current_overhead - baseline_overhead`, not by a
//! further relative change.

use crate::classify::{Polarity, Severity};
use crate::compare::change_fraction;
use crate::loader::ResultSet;
use crate::thresholds::{ThresholdCategory, ThresholdTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Names of the feature-disabled and feature-enabled benchmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverheadPair {
    /// Benchmark measured with the feature off.
    pub disabled: String,
    /// Benchmark measured with the feature on.
    pub enabled: String,
}

impl OverheadPair {
    /// Creates a pair from two benchmark names.
    pub fn new(disabled: impl Into<String>, enabled: impl Into<String>) -> Self {
        Self {
            disabled: disabled.into(),
            enabled: enabled.into(),
        }
    }

    /// Overhead of the feature within one run, or `None` if either
    /// benchmark is absent.
    pub fn overhead_in(&self, run: &ResultSet) -> Option<f64> {
        let disabled = run.get(&self.disabled)?;
        let enabled = run.get(&self.enabled)?;
        Some(change_fraction(disabled.cpu_time, enabled.cpu_time))
    }
}

/// Classified overhead comparison between two runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverheadResult {
    /// Overhead fraction in the baseline run.
    pub baseline_overhead: f64,
    /// Overhead fraction in the current run.
    pub current_overhead: f64,
    /// `current_overhead - baseline_overhead`.
    pub overhead_delta: f64,
    /// Severity of the delta under `safety_overhead` thresholds.
    pub severity: Severity,
}

/// Compares feature overhead across runs.
///
/// Returns `None` unless all four records are present.
pub fn compare_overhead(
    baseline: &ResultSet,
    current: &ResultSet,
    pair: &OverheadPair,
    thresholds: &ThresholdTable,
) -> Option<OverheadResult> {
    let (Some(baseline_overhead), Some(current_overhead)) =
        (pair.overhead_in(baseline), pair.overhead_in(current))
    else {
        debug!(
            disabled = %pair.disabled,
            enabled = %pair.enabled,
            "overhead components missing"
        );
        return None;
    };

    let overhead_delta = current_overhead - baseline_overhead;
    let severity = thresholds.classify(
        overhead_delta,
        ThresholdCategory::SafetyOverhead,
        Polarity::Latency,
    );

    Some(OverheadResult {
        baseline_overhead,
        current_overhead,
        overhead_delta,
        severity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::BenchmarkRecord;

    fn pair() -> OverheadPair {
        OverheadPair::new("BM_Safety/0_mean", "BM_Safety/1_mean")
    }

    fn run(disabled: f64, enabled: f64) -> ResultSet {
        ResultSet::new(vec![
            BenchmarkRecord::new("BM_Safety/0_mean", disabled),
            BenchmarkRecord::new("BM_Safety/1_mean", enabled),
        ])
    }

    #[test]
    fn test_delta_is_percentage_points() {
        let table = ThresholdTable::default();
        let result = compare_overhead(&run(100.0, 110.0), &run(100.0, 118.0), &pair(), &table)
            .expect("all records present");

        assert!((result.baseline_overhead - 0.10).abs() < 1e-12);
        assert!((result.current_overhead - 0.18).abs() < 1e-12);
        assert!((result.overhead_delta - 0.08).abs() < 1e-12);
        assert_eq!(result.severity, Severity::Warning);
    }

    #[test]
    fn test_small_delta_is_ok() {
        let table = ThresholdTable::default();
        let result = compare_overhead(&run(100.0, 105.0), &run(100.0, 109.0), &pair(), &table)
            .unwrap();
        assert!((result.overhead_delta - 0.04).abs() < 1e-12);
        assert_eq!(result.severity, Severity::Ok);
    }

    #[test]
    fn test_overhead_drop_is_improvement() {
        let table = ThresholdTable::default();
        let result = compare_overhead(&run(100.0, 120.0), &run(100.0, 110.0), &pair(), &table)
            .unwrap();
        assert_eq!(result.severity, Severity::Improvement);
    }

    #[test]
    fn test_missing_component_yields_none() {
        let table = ThresholdTable::default();
        let partial = ResultSet::new(vec![BenchmarkRecord::new("BM_Safety/0_mean", 100.0)]);
        assert!(compare_overhead(&run(100.0, 110.0), &partial, &pair(), &table).is_none());
        assert!(compare_overhead(&partial, &run(100.0, 110.0), &pair(), &table).is_none());
    }

    #[test]
    fn test_zero_disabled_time_yields_zero_overhead() {
        assert_eq!(pair().overhead_in(&run(0.0, 50.0)), Some(0.0));
    }
}
