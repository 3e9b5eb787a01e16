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

//! Severity classification.

use crate::thresholds::{ThresholdCategory, ThresholdTable, Thresholds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single comparison, ordered by increasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Within thresholds.
    Ok,
    /// Moved in the improving direction beyond the improvement cutoff.
    Improvement,
    /// Regressed beyond the warning threshold.
    Warning,
    /// Regressed beyond the critical threshold.
    Critical,
}

impl Severity {
    /// Returns the severity as shown in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Improvement => "IMPROVEMENT",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Whether this severity is a regression (warning or critical).
    pub fn is_regression(&self) -> bool {
        matches!(self, Severity::Warning | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sign of change is the regression direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Larger is worse (time, overhead).
    Latency,
    /// Smaller is worse (bytes per second).
    Throughput,
}

/// Classifies a signed change fraction.
///
/// The critical threshold is checked before the warning threshold, and both
/// comparisons are strict: a change exactly on a threshold falls one level
/// below it.
///
/// # Examples
///
/// ```rust
/// use benchgate_core::{classify, Polarity, Severity, Thresholds};
///
/// let t = Thresholds::new(0.10, 0.25);
/// assert_eq!(classify(0.30, t, 0.05, Polarity::Latency), Severity::Critical);
/// assert_eq!(classify(0.10, t, 0.05, Polarity::Latency), Severity::Ok);
/// assert_eq!(classify(-0.06, t, 0.05, Polarity::Latency), Severity::Improvement);
/// ```
pub fn classify(change: f64, thresholds: Thresholds, improvement: f64, polarity: Polarity) -> Severity {
    match polarity {
        Polarity::Latency => {
            if change > thresholds.critical {
                Severity::Critical
            } else if change > thresholds.warning {
                Severity::Warning
            } else if change < -improvement {
                Severity::Improvement
            } else {
                Severity::Ok
            }
        }
        Polarity::Throughput => {
            if change < -thresholds.critical {
                Severity::Critical
            } else if change < -thresholds.warning {
                Severity::Warning
            } else if change > improvement {
                Severity::Improvement
            } else {
                Severity::Ok
            }
        }
    }
}

impl ThresholdTable {
    /// Classifies `change` against this table's thresholds for `category`.
    pub fn classify(&self, change: f64, category: ThresholdCategory, polarity: Polarity) -> Severity {
        classify(change, self.get(category), self.improvement, polarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATENCY: Thresholds = Thresholds::new(0.10, 0.25);
    const THROUGHPUT: Thresholds = Thresholds::new(0.15, 0.30);

    #[test]
    fn test_latency_bands() {
        assert_eq!(classify(0.0, LATENCY, 0.05, Polarity::Latency), Severity::Ok);
        assert_eq!(classify(0.11, LATENCY, 0.05, Polarity::Latency), Severity::Warning);
        assert_eq!(classify(0.26, LATENCY, 0.05, Polarity::Latency), Severity::Critical);
        assert_eq!(classify(-0.051, LATENCY, 0.05, Polarity::Latency), Severity::Improvement);
    }

    #[test]
    fn test_latency_boundaries_are_exclusive() {
        assert_eq!(classify(0.10, LATENCY, 0.05, Polarity::Latency), Severity::Ok);
        assert_eq!(classify(0.25, LATENCY, 0.05, Polarity::Latency), Severity::Warning);
        assert_eq!(classify(-0.05, LATENCY, 0.05, Polarity::Latency), Severity::Ok);
    }

    #[test]
    fn test_throughput_polarity_inverted() {
        assert_eq!(classify(-0.16, THROUGHPUT, 0.05, Polarity::Throughput), Severity::Warning);
        assert_eq!(classify(-0.31, THROUGHPUT, 0.05, Polarity::Throughput), Severity::Critical);
        assert_eq!(classify(0.20, THROUGHPUT, 0.05, Polarity::Throughput), Severity::Improvement);
        assert_eq!(classify(0.40, THROUGHPUT, 0.05, Polarity::Throughput), Severity::Improvement);
        assert_eq!(classify(-0.15, THROUGHPUT, 0.05, Polarity::Throughput), Severity::Ok);
        assert_eq!(classify(-0.30, THROUGHPUT, 0.05, Polarity::Throughput), Severity::Warning);
        assert_eq!(classify(0.05, THROUGHPUT, 0.05, Polarity::Throughput), Severity::Ok);
    }

    #[test]
    fn test_table_classify_uses_category() {
        let table = ThresholdTable::default();
        assert_eq!(
            table.classify(0.06, ThresholdCategory::SafetyOverhead, Polarity::Latency),
            Severity::Warning
        );
        assert_eq!(
            table.classify(0.06, ThresholdCategory::CoreLatency, Polarity::Latency),
            Severity::Ok
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Improvement);
        assert!(Severity::Improvement > Severity::Ok);
        let worst = [Severity::Warning, Severity::Critical, Severity::Ok]
            .into_iter()
            .max();
        assert_eq!(worst, Some(Severity::Critical));
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Severity::Ok).unwrap(), "\"OK\"");
        assert_eq!(
            serde_json::to_string(&Severity::Improvement).unwrap(),
            "\"IMPROVEMENT\""
        );
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }
}
