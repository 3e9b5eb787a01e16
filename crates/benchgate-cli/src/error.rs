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

//! Structured error types for the Benchgate CLI.
//!
//! Every variant is an invocation failure and maps to
//! [`EXIT_INVOCATION_FAILURE`]. Regressions are never errors; they travel in
//! the report and the gate outcome.

use benchgate_core::{ConfigError, LoadError, EXIT_INVOCATION_FAILURE};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Benchgate CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use benchgate_cli::error::CliError;
///
/// fn write(path: &str, report: &str) -> Result<(), CliError> {
///     std::fs::write(path, report).map_err(|e| CliError::output_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// A benchmark document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The gate configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The report could not be written.
    #[error("Failed to write report to '{path}': {message}")]
    Output {
        /// Destination path
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The report could not be serialised as JSON.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create an output error with file path context.
    pub fn output_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Output {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        EXIT_INVOCATION_FAILURE
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_is_transparent() {
        let err: CliError = LoadError::NotFound {
            path: PathBuf::from("base.json"),
        }
        .into();
        assert_eq!(err.to_string(), "File base.json not found");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_output_error_display() {
        let err = CliError::output_error(
            "/readonly/report.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/readonly/report.txt"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_json_format_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let cli_err: CliError = json_err.into();
        assert!(matches!(cli_err, CliError::JsonFormat { .. }));
    }

    #[test]
    fn test_error_cloning() {
        let err: CliError = ConfigError::InvalidImprovementCutoff(-1.0).into();
        assert_eq!(err.to_string(), err.clone().to_string());
    }
}
