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

//! Pairwise metric comparison between a baseline and a current run.

use crate::classify::{Polarity, Severity};
use crate::loader::{BenchmarkRecord, ResultSet};
use crate::thresholds::{ThresholdCategory, ThresholdTable};
use serde::Serialize;
use tracing::debug;

/// Relative change from `baseline` to `current`.
///
/// A zero baseline yields `0.0` rather than a division fault.
///
/// # Examples
///
/// ```rust
/// use benchgate_core::change_fraction;
///
/// assert_eq!(change_fraction(100.0, 130.0), 0.3);
/// assert_eq!(change_fraction(0.0, 42.0), 0.0);
/// ```
pub fn change_fraction(baseline: f64, current: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (current - baseline) / baseline
}

/// Which field of a record a comparison reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// `cpu_time`
    CpuTime,
    /// `bytes_per_second`, missing values read as zero
    BytesPerSecond,
}

impl Measure {
    /// Reads this measure from a record.
    pub fn read(&self, record: &BenchmarkRecord) -> f64 {
        match self {
            Measure::CpuTime => record.cpu_time,
            Measure::BytesPerSecond => record.bytes_per_second.unwrap_or(0.0),
        }
    }
}

/// A classified comparison of one named metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Benchmark name.
    pub metric_name: String,
    /// Baseline value of the compared measure.
    pub baseline_value: f64,
    /// Current value of the compared measure.
    pub current_value: f64,
    /// Signed `(current - baseline) / baseline`.
    pub change_fraction: f64,
    /// Classified severity.
    pub severity: Severity,
}

impl ComparisonResult {
    /// Change expressed in percent.
    pub fn change_percent(&self) -> f64 {
        self.change_fraction * 100.0
    }
}

/// Compares lists of named metrics under a threshold table.
#[derive(Debug, Clone, Copy)]
pub struct MetricComparator<'a> {
    thresholds: &'a ThresholdTable,
}

impl<'a> MetricComparator<'a> {
    /// Creates a comparator over the given thresholds.
    pub fn new(thresholds: &'a ThresholdTable) -> Self {
        Self { thresholds }
    }

    /// Compares each name present in both sets, in the order given.
    ///
    /// Names missing from either set are skipped without error.
    pub fn compare<S: AsRef<str>>(
        &self,
        baseline: &ResultSet,
        current: &ResultSet,
        names: &[S],
        measure: Measure,
        category: ThresholdCategory,
        polarity: Polarity,
    ) -> Vec<ComparisonResult> {
        let mut results = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let (Some(base), Some(cur)) = (baseline.get(name), current.get(name)) else {
                debug!(metric = name, "metric missing from baseline or current, skipped");
                continue;
            };

            let baseline_value = measure.read(base);
            let current_value = measure.read(cur);
            let change = change_fraction(baseline_value, current_value);
            let severity = self.thresholds.classify(change, category, polarity);
            debug!(metric = name, change, %severity, "compared metric");

            results.push(ComparisonResult {
                metric_name: name.to_string(),
                baseline_value,
                current_value,
                change_fraction: change,
                severity,
            });
        }

        results
    }

    /// Compares CPU time under `core_latency` thresholds.
    pub fn compare_latency<S: AsRef<str>>(
        &self,
        baseline: &ResultSet,
        current: &ResultSet,
        names: &[S],
    ) -> Vec<ComparisonResult> {
        self.compare(
            baseline,
            current,
            names,
            Measure::CpuTime,
            ThresholdCategory::CoreLatency,
            Polarity::Latency,
        )
    }

    /// Compares bytes per second under `throughput` thresholds.
    pub fn compare_throughput<S: AsRef<str>>(
        &self,
        baseline: &ResultSet,
        current: &ResultSet,
        names: &[S],
    ) -> Vec<ComparisonResult> {
        self.compare(
            baseline,
            current,
            names,
            Measure::BytesPerSecond,
            ThresholdCategory::Throughput,
            Polarity::Throughput,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(records: &[(&str, f64)]) -> ResultSet {
        records
            .iter()
            .map(|(name, t)| BenchmarkRecord::new(*name, *t))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_change_fraction() {
        assert_eq!(change_fraction(100.0, 100.0), 0.0);
        assert_eq!(change_fraction(100.0, 50.0), -0.5);
        assert_eq!(change_fraction(0.0, 0.0), 0.0);
        assert_eq!(change_fraction(0.0, 1e9), 0.0);
    }

    #[test]
    fn test_compare_latency_critical() {
        let table = ThresholdTable::default();
        let comparator = MetricComparator::new(&table);
        let base = set(&[("BM_MakeMove_ShortChain_mean", 100.0)]);
        let cur = set(&[("BM_MakeMove_ShortChain_mean", 130.0)]);

        let results = comparator.compare_latency(&base, &cur, &["BM_MakeMove_ShortChain_mean"]);
        assert_eq!(results.len(), 1);
        assert!((results[0].change_fraction - 0.30).abs() < 1e-12);
        assert_eq!(results[0].severity, Severity::Critical);
    }

    #[test]
    fn test_missing_names_are_skipped_in_order() {
        let table = ThresholdTable::default();
        let comparator = MetricComparator::new(&table);
        let base = set(&[("BM_A", 1.0), ("BM_B", 1.0), ("BM_C", 1.0)]);
        let cur = set(&[("BM_C", 1.0), ("BM_A", 1.0)]);

        let results = comparator.compare_latency(&base, &cur, &["BM_C", "BM_B", "BM_A", "BM_D"]);
        let names: Vec<_> = results.iter().map(|r| r.metric_name.as_str()).collect();
        assert_eq!(names, ["BM_C", "BM_A"]);
    }

    #[test]
    fn test_compare_throughput_reads_bytes_per_second() {
        let table = ThresholdTable::default();
        let comparator = MetricComparator::new(&table);
        let base = ResultSet::new(vec![
            BenchmarkRecord::new("BM_Mem", 5.0).with_bytes_per_second(1000.0)
        ]);
        let cur = ResultSet::new(vec![
            BenchmarkRecord::new("BM_Mem", 5.0).with_bytes_per_second(840.0)
        ]);

        let results = comparator.compare_throughput(&base, &cur, &["BM_Mem"]);
        assert_eq!(results[0].baseline_value, 1000.0);
        assert_eq!(results[0].current_value, 840.0);
        assert_eq!(results[0].severity, Severity::Warning);
    }

    #[test]
    fn test_missing_throughput_reads_zero() {
        let table = ThresholdTable::default();
        let comparator = MetricComparator::new(&table);
        let base = set(&[("BM_Mem", 5.0)]);
        let cur = ResultSet::new(vec![
            BenchmarkRecord::new("BM_Mem", 5.0).with_bytes_per_second(840.0)
        ]);

        let results = comparator.compare_throughput(&base, &cur, &["BM_Mem"]);
        assert_eq!(results[0].change_fraction, 0.0);
        assert_eq!(results[0].severity, Severity::Ok);
    }
}
