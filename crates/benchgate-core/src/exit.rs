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

//! CI exit policy.
//!
//! | code | meaning                                           |
//! |------|---------------------------------------------------|
//! | 0    | no regressions, or failure signalling not enabled |
//! | 1    | warnings only                                     |
//! | 2    | at least one critical regression                  |
//! | 3    | invocation failed (inputs, config, output, usage) |

use serde::Serialize;

/// Exit code for a failed invocation, kept apart from the regression codes.
pub const EXIT_INVOCATION_FAILURE: u8 = 3;

/// Aggregate verdict of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Nothing crossed a warning threshold.
    Clean,
    /// Warnings but no critical regressions.
    Warnings,
    /// At least one critical regression.
    Critical,
}

impl GateOutcome {
    /// Critical issues take precedence over warnings.
    pub fn from_issues<C, W>(critical_issues: &[C], warnings: &[W]) -> Self {
        if !critical_issues.is_empty() {
            GateOutcome::Critical
        } else if !warnings.is_empty() {
            GateOutcome::Warnings
        } else {
            GateOutcome::Clean
        }
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            GateOutcome::Clean => 0,
            GateOutcome::Warnings => 1,
            GateOutcome::Critical => 2,
        }
    }

    /// Exit code honouring the caller's opt-in: without it, always `0`.
    pub fn exit_code_if(&self, exit_on_regression: bool) -> u8 {
        if exit_on_regression {
            self.exit_code()
        } else {
            0
        }
    }
}
