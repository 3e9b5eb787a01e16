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

//! Regression threshold table.
//!
//! Thresholds are fractions of the baseline (`0.10` = 10%). The table is an
//! immutable value handed to the comparators; nothing mutates it after
//! construction.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default fraction beyond which a change in the improving direction is
/// reported as [`Severity::Improvement`](crate::Severity::Improvement).
pub const DEFAULT_IMPROVEMENT_CUTOFF: f64 = 0.05;

/// Metric category, each with its own warning/critical pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdCategory {
    /// Hot-path latency (CPU time per operation).
    CoreLatency,
    /// Overhead of the optional safety feature, in percentage points.
    SafetyOverhead,
    /// Byte throughput, where a decrease is the regression direction.
    Throughput,
    /// Memory footprint.
    Memory,
}

impl ThresholdCategory {
    /// All categories in table order.
    pub const ALL: [ThresholdCategory; 4] = [
        ThresholdCategory::CoreLatency,
        ThresholdCategory::SafetyOverhead,
        ThresholdCategory::Throughput,
        ThresholdCategory::Memory,
    ];

    /// Returns the category as its configuration key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdCategory::CoreLatency => "core_latency",
            ThresholdCategory::SafetyOverhead => "safety_overhead",
            ThresholdCategory::Throughput => "throughput",
            ThresholdCategory::Memory => "memory",
        }
    }
}

impl fmt::Display for ThresholdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning and critical fractions for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Change beyond which a result is a warning.
    pub warning: f64,
    /// Change beyond which a result is critical.
    pub critical: f64,
}

impl Thresholds {
    /// Creates a threshold pair.
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    fn validate(&self, category: ThresholdCategory) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidThreshold {
            category: category.to_string(),
            reason: reason.to_string(),
        };

        if !self.warning.is_finite() || !self.critical.is_finite() {
            return Err(invalid("thresholds must be finite"));
        }
        if self.warning <= 0.0 {
            return Err(invalid("warning must be positive"));
        }
        if self.critical <= self.warning {
            return Err(invalid("critical must exceed warning"));
        }
        Ok(())
    }
}

/// Per-category thresholds plus the improvement cutoff.
///
/// `Default` yields the stock CI policy:
///
/// | category          | warning | critical |
/// |-------------------|---------|----------|
/// | `core_latency`    | 10%     | 25%      |
/// | `safety_overhead` | 5%      | 15%      |
/// | `throughput`      | 15%     | 30%      |
/// | `memory`          | 20%     | 50%      |
///
/// Deserialisation fills any omitted field from these defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    /// Latency thresholds.
    pub core_latency: Thresholds,
    /// Safety overhead thresholds (percentage-point deltas).
    pub safety_overhead: Thresholds,
    /// Throughput thresholds (applied to decreases).
    pub throughput: Thresholds,
    /// Memory thresholds.
    pub memory: Thresholds,
    /// Improvement cutoff, shared by every category.
    pub improvement: f64,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            core_latency: Thresholds::new(0.10, 0.25),
            safety_overhead: Thresholds::new(0.05, 0.15),
            throughput: Thresholds::new(0.15, 0.30),
            memory: Thresholds::new(0.20, 0.50),
            improvement: DEFAULT_IMPROVEMENT_CUTOFF,
        }
    }
}

impl ThresholdTable {
    /// Returns the thresholds for a category.
    pub fn get(&self, category: ThresholdCategory) -> Thresholds {
        match category {
            ThresholdCategory::CoreLatency => self.core_latency,
            ThresholdCategory::SafetyOverhead => self.safety_overhead,
            ThresholdCategory::Throughput => self.throughput,
            ThresholdCategory::Memory => self.memory,
        }
    }

    /// Returns a copy with one category replaced.
    pub fn with(mut self, category: ThresholdCategory, thresholds: Thresholds) -> Self {
        match category {
            ThresholdCategory::CoreLatency => self.core_latency = thresholds,
            ThresholdCategory::SafetyOverhead => self.safety_overhead = thresholds,
            ThresholdCategory::Throughput => self.throughput = thresholds,
            ThresholdCategory::Memory => self.memory = thresholds,
        }
        self
    }

    /// Checks `0 < warning < critical` for every category and a positive
    /// finite improvement cutoff.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in ThresholdCategory::ALL {
            self.get(category).validate(category)?;
        }
        if !self.improvement.is_finite() || self.improvement <= 0.0 {
            return Err(ConfigError::InvalidImprovementCutoff(self.improvement));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = ThresholdTable::default();
        assert_eq!(table.get(ThresholdCategory::CoreLatency), Thresholds::new(0.10, 0.25));
        assert_eq!(table.get(ThresholdCategory::SafetyOverhead), Thresholds::new(0.05, 0.15));
        assert_eq!(table.get(ThresholdCategory::Throughput), Thresholds::new(0.15, 0.30));
        assert_eq!(table.get(ThresholdCategory::Memory), Thresholds::new(0.20, 0.50));
        assert_eq!(table.improvement, 0.05);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_with_replaces_one_category() {
        let table = ThresholdTable::default()
            .with(ThresholdCategory::Throughput, Thresholds::new(0.01, 0.02));
        assert_eq!(table.throughput, Thresholds::new(0.01, 0.02));
        assert_eq!(table.core_latency, Thresholds::new(0.10, 0.25));
    }

    #[test]
    fn test_validate_rejects_inverted_pair() {
        let table = ThresholdTable::default()
            .with(ThresholdCategory::Memory, Thresholds::new(0.5, 0.2));
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("memory"));
    }

    #[test]
    fn test_validate_rejects_non_positive_warning() {
        let table = ThresholdTable::default()
            .with(ThresholdCategory::CoreLatency, Thresholds::new(0.0, 0.2));
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_cutoff() {
        let table = ThresholdTable {
            improvement: f64::NAN,
            ..ThresholdTable::default()
        };
        assert!(matches!(
            table.validate(),
            Err(ConfigError::InvalidImprovementCutoff(_))
        ));
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let table: ThresholdTable =
            serde_json::from_str(r#"{"core_latency": {"warning": 0.2, "critical": 0.4}}"#)
                .unwrap();
        assert_eq!(table.core_latency, Thresholds::new(0.2, 0.4));
        assert_eq!(table.throughput, Thresholds::new(0.15, 0.30));
        assert_eq!(table.improvement, DEFAULT_IMPROVEMENT_CUTOFF);
    }

    #[test]
    fn test_category_names() {
        let names: Vec<_> = ThresholdCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["core_latency", "safety_overhead", "throughput", "memory"]);
    }
}
