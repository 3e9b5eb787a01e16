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

//! Error types for loading benchmark documents and gate configuration.
//!
//! Loading is the only fallible stage of the engine. Missing metrics and
//! threshold breaches are ordinary outcomes recorded in the
//! [`Report`](crate::Report), never errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a benchmark-result document into a [`ResultSet`](crate::ResultSet).
///
/// Any `LoadError` is fatal for an invocation: no comparison is meaningful
/// without both inputs.
///
/// # Examples
///
/// ```rust
/// use benchgate_core::{load_result_set, LoadError};
///
/// let err = load_result_set("/nonexistent/baseline.json").unwrap_err();
/// assert!(matches!(err, LoadError::NotFound { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The document does not exist.
    #[error("File {path} not found")]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The document exists but could not be read.
    #[error("Failed to read '{path}': {message}")]
    Unreadable {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error message
        message: String,
    },

    /// The document is larger than the configured size guard.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    TooLarge {
        /// Path that exceeded the limit
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// The document is not JSON, or is JSON of neither accepted shape.
    #[error("Invalid JSON in {path}: {message}")]
    Malformed {
        /// Path of the offending document
        path: PathBuf,
        /// Decoder error message
        message: String,
    },
}

impl LoadError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Unreadable {
                path,
                message: source.to_string(),
            },
        }
    }

    /// Create a malformed-document error.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path of the document that failed to load.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::Unreadable { path, .. }
            | Self::TooLarge { path, .. }
            | Self::Malformed { path, .. } => path,
        }
    }
}

/// Failure to load or validate a [`GateConfig`](crate::GateConfig).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {message}")]
    Unreadable {
        /// Config path
        path: PathBuf,
        /// Underlying I/O error message
        message: String,
    },

    /// The configuration file could not be decoded.
    #[error("Invalid config '{path}': {message}")]
    Malformed {
        /// Config path
        path: PathBuf,
        /// Decoder error message
        message: String,
    },

    /// The file extension names no supported format.
    #[error("Unsupported config format for '{path}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat {
        /// Config path
        path: PathBuf,
    },

    /// A threshold pair violates `0 < warning < critical`.
    #[error("Invalid thresholds for {category}: {reason}")]
    InvalidThreshold {
        /// Category whose thresholds are wrong
        category: String,
        /// What is wrong with them
        reason: String,
    },

    /// The improvement cutoff is not a positive finite fraction.
    #[error("Invalid improvement cutoff {0}: must be positive and finite")]
    InvalidImprovementCutoff(f64),
}
