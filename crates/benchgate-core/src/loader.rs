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

//! Benchmark-result document loading.
//!
//! Two document shapes are accepted and normalised into one [`ResultSet`]:
//!
//! ```json
//! { "context": { ... }, "benchmarks": [ { "name": "BM_A", "cpu_time": 1.5 } ] }
//! ```
//!
//! and the legacy bare array:
//!
//! ```json
//! [ { "name": "BM_A", "cpu_time": 1.5 } ]
//! ```
//!
//! The bare `NaN`, `Infinity` and `-Infinity` tokens Google Benchmark writes
//! for non-finite doubles are accepted as numeric values.

use crate::error::LoadError;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Default maximum input document size (256 MB).
/// Can be overridden via the `BENCHGATE_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Environment variable holding the input size limit in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "BENCHGATE_MAX_FILE_SIZE";

/// A single named benchmark measurement.
///
/// Only the fields the gate inspects are decoded; everything else the
/// harness writes (`real_time`, `time_unit`, `iterations`, ...) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Benchmark name, e.g. `BM_MakeMove_ShortChain_mean`.
    #[serde(default)]
    pub name: String,
    /// CPU time per iteration, in the document's base time unit.
    #[serde(default, deserialize_with = "measurement::required")]
    pub cpu_time: f64,
    /// Processed bytes per second, when the benchmark reports throughput.
    #[serde(default, deserialize_with = "measurement::optional")]
    pub bytes_per_second: Option<f64>,
}

impl BenchmarkRecord {
    /// Creates a latency-only record.
    pub fn new(name: impl Into<String>, cpu_time: f64) -> Self {
        Self {
            name: name.into(),
            cpu_time,
            bytes_per_second: None,
        }
    }

    /// Attaches a throughput measurement.
    pub fn with_bytes_per_second(mut self, bytes_per_second: f64) -> Self {
        self.bytes_per_second = Some(bytes_per_second);
        self
    }
}

/// Field decoders accepting numbers and the non-finite names.
mod measurement {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use std::fmt;

    struct MeasurementVisitor;

    impl<'de> Visitor<'de> for MeasurementVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, NaN, Infinity or -Infinity")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            match v {
                "NaN" => Ok(Some(f64::NAN)),
                "Infinity" => Ok(Some(f64::INFINITY)),
                "-Infinity" => Ok(Some(f64::NEG_INFINITY)),
                _ => Err(E::invalid_type(Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    pub(super) fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer
            .deserialize_any(MeasurementVisitor)?
            .ok_or_else(|| de::Error::invalid_type(Unexpected::Unit, &MeasurementVisitor))
    }

    pub(super) fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        deserializer.deserialize_any(MeasurementVisitor)
    }
}

/// Quotes bare `NaN`, `Infinity` and `-Infinity` tokens so the document
/// parses as strict JSON. String contents are left untouched.
fn quote_non_finite(json: &str) -> Cow<'_, str> {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    let bytes = json.as_bytes();
    let mut quoted: Option<String> = None;
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }
        if matches!(b, b'-' | b'I' | b'N') {
            if let Some(token) = TOKENS.iter().find(|t| bytes[i..].starts_with(t.as_bytes())) {
                let out = quoted.get_or_insert_with(|| String::with_capacity(json.len() + 16));
                out.push_str(&json[copied..i]);
                out.push('"');
                out.push_str(token);
                out.push('"');
                i += token.len();
                copied = i;
                continue;
            }
        }
        i += 1;
    }

    match quoted {
        Some(mut out) => {
            out.push_str(&json[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(json),
    }
}

/// Decodes one entry, naming its position (and name, if any) on failure.
fn decode_record(index: usize, entry: Value) -> Result<BenchmarkRecord, serde_json::Error> {
    let name = entry.get("name").and_then(Value::as_str).map(str::to_owned);
    serde_json::from_value(entry).map_err(|e| match name {
        Some(name) => serde_json::Error::custom(format!("benchmarks[{index}] ({name}): {e}")),
        None => serde_json::Error::custom(format!("benchmarks[{index}]: {e}")),
    })
}

/// An ordered set of benchmark records from one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    records: Vec<BenchmarkRecord>,
}

impl ResultSet {
    /// Creates a result set from records in document order.
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        Self { records }
    }

    /// Decodes either accepted document shape from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the text is not JSON, is neither a
    /// `benchmarks`-carrying object nor a bare array, or holds an entry that
    /// is not a benchmark record. Entry errors name the offending position.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries = match serde_json::from_str::<Value>(&quote_non_finite(json))? {
            Value::Object(mut document) => match document.remove("benchmarks") {
                Some(Value::Array(entries)) => entries,
                Some(_) => return Err(serde_json::Error::custom("`benchmarks` is not an array")),
                None => {
                    return Err(serde_json::Error::custom(
                        "expected a `benchmarks` array or a bare array of records",
                    ))
                }
            },
            Value::Array(entries) => entries,
            _ => {
                return Err(serde_json::Error::custom(
                    "expected a `benchmarks` array or a bare array of records",
                ))
            }
        };

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| decode_record(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Looks up a record by exact name. The first match wins.
    pub fn get(&self, name: &str) -> Option<&BenchmarkRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    /// Returns the records in document order.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<BenchmarkRecord>> for ResultSet {
    fn from(records: Vec<BenchmarkRecord>) -> Self {
        Self::new(records)
    }
}

/// Reads the input size limit from the environment, falling back to
/// [`DEFAULT_MAX_FILE_SIZE`] when unset or unparsable.
pub fn max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Loads a benchmark-result document using the environment's size limit.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file is missing, unreadable, larger than
/// the limit, or not a JSON document of either accepted shape.
///
/// # Examples
///
/// ```no_run
/// use benchgate_core::load_result_set;
///
/// let baseline = load_result_set("baseline.json")?;
/// println!("{} records", baseline.len());
/// # Ok::<(), benchgate_core::LoadError>(())
/// ```
pub fn load_result_set(path: impl AsRef<Path>) -> Result<ResultSet, LoadError> {
    load_result_set_with_limit(path, max_file_size())
}

/// Loads a benchmark-result document, rejecting files over `max_bytes`.
pub fn load_result_set_with_limit(
    path: impl AsRef<Path>,
    max_bytes: u64,
) -> Result<ResultSet, LoadError> {
    let path = path.as_ref();

    // The handle is dropped on every return path, including decode failures.
    let mut file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let size = file
        .metadata()
        .map_err(|e| LoadError::from_io(path, e))?
        .len();
    if size > max_bytes {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            actual: size,
            max: max_bytes,
        });
    }

    let mut contents = String::with_capacity(size as usize);
    file.read_to_string(&mut contents)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => LoadError::malformed(path, e.to_string()),
            _ => LoadError::from_io(path, e),
        })?;

    let set = ResultSet::from_json_str(&contents)
        .map_err(|e| LoadError::malformed(path, e.to_string()))?;
    debug!(path = %path.display(), records = set.len(), "loaded benchmark results");
    Ok(set)
}
