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

//! Gate configuration.
//!
//! Describes which benchmarks the gate inspects and under which thresholds.
//! The defaults encode the stock makeMove suite; a JSON or YAML file can
//! override any part of it.
//!
//! # Example
//!
//! ```yaml
//! thresholds:
//!   core_latency: { warning: 0.08, critical: 0.20 }
//! suite:
//!   core_latency:
//!     names: [BM_Parse_Small_mean, BM_Parse_Large_mean]
//!     strip_prefix: BM_Parse_
//!     strip_suffix: _mean
//! ```

use crate::error::ConfigError;
use crate::overhead::OverheadPair;
use crate::thresholds::ThresholdTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An ordered group of benchmarks rendered in one report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGroup {
    /// Benchmark names, in report order.
    pub names: Vec<String>,
    /// Prefix removed from names when rendering labels.
    #[serde(default)]
    pub strip_prefix: String,
    /// Suffix removed from names when rendering labels.
    #[serde(default)]
    pub strip_suffix: String,
}

impl MetricGroup {
    /// Creates a group with label trimming.
    pub fn new<I, S>(names: I, strip_prefix: &str, strip_suffix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            strip_prefix: strip_prefix.to_string(),
            strip_suffix: strip_suffix.to_string(),
        }
    }

    /// Short display label for a benchmark name.
    ///
    /// Every occurrence of the prefix and suffix is removed, so
    /// `BM_MakeMove_ShortChain_mean` becomes `ShortChain`.
    pub fn label(&self, name: &str) -> String {
        let mut label = name.to_string();
        if !self.strip_prefix.is_empty() {
            label = label.replace(&self.strip_prefix, "");
        }
        if !self.strip_suffix.is_empty() {
            label = label.replace(&self.strip_suffix, "");
        }
        label
    }
}

/// The benchmarks inspected by each report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricSuite {
    /// Latency benchmarks (CPU time).
    pub core_latency: MetricGroup,
    /// Feature overhead pair.
    pub safety_overhead: OverheadPair,
    /// Memory benchmarks compared by throughput.
    pub memory_throughput: MetricGroup,
}

impl Default for MetricSuite {
    fn default() -> Self {
        Self {
            core_latency: MetricGroup::new(
                [
                    "BM_MakeMove_ShortChain_mean",
                    "BM_MakeMove_MediumChain_mean",
                    "BM_MakeMove_LongChain_mean",
                ],
                "BM_MakeMove_",
                "_mean",
            ),
            safety_overhead: OverheadPair::new(
                "BM_SafetyLevel_Comparison/0_mean",
                "BM_SafetyLevel_Comparison/1_mean",
            ),
            memory_throughput: MetricGroup::new(
                [
                    "BM_MakeMove_MemoryTracking/64_mean",
                    "BM_MakeMove_MemoryTracking/256_mean",
                ],
                "BM_MakeMove_MemoryTracking/",
                "_mean",
            ),
        }
    }
}

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn decode(self, path: &Path, contents: &str) -> Result<GateConfig, ConfigError> {
        let malformed = |message: String| ConfigError::Malformed {
            path: path.to_path_buf(),
            message,
        };
        match self {
            Self::Json => serde_json::from_str(contents).map_err(|e| malformed(e.to_string())),
            Self::Yaml => serde_yaml::from_str(contents).map_err(|e| malformed(e.to_string())),
        }
    }
}

/// Complete gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Threshold policy.
    pub thresholds: ThresholdTable,
    /// Inspected benchmarks.
    pub suite: MetricSuite,
}

impl GateConfig {
    /// Loads a configuration file, choosing the decoder by extension
    /// (`.json`, `.yaml`, `.yml`), then validates thresholds. Omitted fields
    /// keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or decoded, has
    /// an unknown extension, or holds invalid thresholds.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = format.decode(path, &contents)?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the threshold table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::Thresholds;
    use std::io::Write;

    fn temp_with_suffix(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    #[test]
    fn test_group_label() {
        let suite = MetricSuite::default();
        assert_eq!(
            suite.core_latency.label("BM_MakeMove_ShortChain_mean"),
            "ShortChain"
        );
        assert_eq!(
            suite.memory_throughput.label("BM_MakeMove_MemoryTracking/256_mean"),
            "256"
        );
        let plain = MetricGroup::new(["BM_X"], "", "");
        assert_eq!(plain.label("BM_X"), "BM_X");
    }

    #[test]
    fn test_load_json_partial_override() {
        let file = temp_with_suffix(
            r#"{"thresholds": {"throughput": {"warning": 0.05, "critical": 0.10}}}"#,
            ".json",
        );
        let config = GateConfig::load(file.path()).unwrap();
        assert_eq!(config.thresholds.throughput, Thresholds::new(0.05, 0.10));
        assert_eq!(config.suite, MetricSuite::default());
    }

    #[test]
    fn test_load_yaml_suite() {
        let file = temp_with_suffix(
            "suite:\n  core_latency:\n    names: [BM_Parse_mean]\n    strip_prefix: BM_\n",
            ".yaml",
        );
        let config = GateConfig::load(file.path()).unwrap();
        assert_eq!(config.suite.core_latency.names, ["BM_Parse_mean"]);
        assert_eq!(config.suite.core_latency.strip_suffix, "");
        assert_eq!(config.thresholds, ThresholdTable::default());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = temp_with_suffix("{}", ".toml");
        assert!(matches!(
            GateConfig::load(file.path()),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_load_rejects_invalid_thresholds() {
        let file = temp_with_suffix(
            r#"{"thresholds": {"memory": {"warning": 0.6, "critical": 0.5}}}"#,
            ".json",
        );
        assert!(matches!(
            GateConfig::load(file.path()),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_load_rejects_malformed() {
        let file = temp_with_suffix("{ nope", ".json");
        assert!(matches!(
            GateConfig::load(file.path()),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_malformed_yaml_carries_path() {
        let file = temp_with_suffix("thresholds: [unclosed", ".YML");
        match GateConfig::load(file.path()) {
            Err(ConfigError::Malformed { path, message }) => {
                assert_eq!(path, file.path());
                assert!(!message.is_empty());
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("gate.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("gate.Yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("gate")), None);
    }
}
