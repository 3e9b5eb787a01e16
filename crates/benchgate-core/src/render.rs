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

//! Report rendering.
//!
//! Pure functions of a finished [`Report`]; identical reports render to
//! byte-identical output.

use crate::exit::GateOutcome;
use crate::report::Report;
use serde::Serialize;

const RULE: &str = "============================================================";
const SECTION_RULE: &str = "----------------------------------------";

/// Formats a time given in microseconds with an auto-scaled unit.
///
/// Scaling is presentational only; classification always uses raw values.
///
/// # Examples
///
/// ```rust
/// use benchgate_core::format_time;
///
/// assert_eq!(format_time(0.5), "500.00 ns");
/// assert_eq!(format_time(12.5), "12.50 μs");
/// assert_eq!(format_time(2500.0), "2.50 ms");
/// ```
pub fn format_time(time_us: f64) -> String {
    if time_us < 1.0 {
        format!("{:.2} ns", time_us * 1000.0)
    } else if time_us < 1000.0 {
        format!("{:.2} μs", time_us)
    } else {
        format!("{:.2} ms", time_us / 1000.0)
    }
}

/// Renders the plain-text report.
///
/// Lines are joined with `\n`; the result carries no trailing newline.
pub fn render_text(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut push = |line: String| lines.push(line);

    push(RULE.to_string());
    push("BENCHMARK REGRESSION ANALYSIS REPORT".to_string());
    push(RULE.to_string());
    push(format!("Baseline: {}", report.baseline));
    push(format!("Current:  {}", report.current));
    push(String::new());

    push("CORE PERFORMANCE ANALYSIS".to_string());
    push(SECTION_RULE.to_string());
    for entry in &report.core_latency {
        let result = &entry.result;
        push(format!(
            "{:<15}: {} → {} ({:+.1}%) [{}]",
            entry.label,
            format_time(result.baseline_value),
            format_time(result.current_value),
            result.change_percent(),
            result.severity
        ));
    }
    push(String::new());

    push("SAFETY SYSTEM OVERHEAD ANALYSIS".to_string());
    push(SECTION_RULE.to_string());
    match &report.safety_overhead {
        Some(overhead) => {
            push(format!(
                "Baseline overhead: {:.2}%",
                overhead.baseline_overhead * 100.0
            ));
            push(format!(
                "Current overhead:  {:.2}%",
                overhead.current_overhead * 100.0
            ));
            push(format!(
                "Change:           {:+.2}% [{}]",
                overhead.overhead_delta * 100.0,
                overhead.severity
            ));
        }
        None => push("Safety overhead data not available".to_string()),
    }
    push(String::new());

    push("MEMORY PERFORMANCE ANALYSIS".to_string());
    push(SECTION_RULE.to_string());
    for entry in &report.memory {
        push(format!(
            "Chain {:<3}: {:+.1}% throughput change [{}]",
            entry.label,
            entry.result.change_percent(),
            entry.result.severity
        ));
    }
    push(String::new());

    push("SUMMARY".to_string());
    push(SECTION_RULE.to_string());
    if !report.critical_issues.is_empty() {
        push("\u{274c} CRITICAL ISSUES DETECTED:".to_string());
        for issue in &report.critical_issues {
            push(format!("   {issue}"));
        }
    }
    if !report.warnings.is_empty() {
        push("\u{26a0}\u{fe0f}  WARNINGS:".to_string());
        for warning in &report.warnings {
            push(format!("   {warning}"));
        }
    }
    if report.critical_issues.is_empty() && report.warnings.is_empty() {
        push("\u{2705} No performance regressions detected".to_string());
    }
    push(String::new());
    push(RULE.to_string());

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a Report,
    outcome: GateOutcome,
}

/// Renders the report as pretty-printed JSON, including the gate outcome.
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        report,
        outcome: report.outcome(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Severity;
    use crate::compare::ComparisonResult;
    use crate::overhead::OverheadResult;
    use crate::report::MetricEntry;

    fn empty_report() -> Report {
        Report {
            baseline: "base.json".to_string(),
            current: "cur.json".to_string(),
            core_latency: Vec::new(),
            safety_overhead: None,
            memory: Vec::new(),
            warnings: Vec::new(),
            critical_issues: Vec::new(),
        }
    }

    #[test]
    fn test_format_time_units() {
        assert_eq!(format_time(0.0), "0.00 ns");
        assert_eq!(format_time(0.999), "999.00 ns");
        assert_eq!(format_time(1.0), "1.00 μs");
        assert_eq!(format_time(999.994), "999.99 μs");
        assert_eq!(format_time(1000.0), "1.00 ms");
        assert_eq!(format_time(1_234_567.0), "1234.57 ms");
    }

    #[test]
    fn test_clean_report_layout() {
        let text = render_text(&empty_report());
        let expected = [
            RULE,
            "BENCHMARK REGRESSION ANALYSIS REPORT",
            RULE,
            "Baseline: base.json",
            "Current:  cur.json",
            "",
            "CORE PERFORMANCE ANALYSIS",
            SECTION_RULE,
            "",
            "SAFETY SYSTEM OVERHEAD ANALYSIS",
            SECTION_RULE,
            "Safety overhead data not available",
            "",
            "MEMORY PERFORMANCE ANALYSIS",
            SECTION_RULE,
            "",
            "SUMMARY",
            SECTION_RULE,
            "✅ No performance regressions detected",
            "",
            RULE,
        ]
        .join("\n");
        assert_eq!(text, expected);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_section_lines() {
        let mut report = empty_report();
        report.core_latency.push(MetricEntry {
            label: "ShortChain".to_string(),
            result: ComparisonResult {
                metric_name: "BM_MakeMove_ShortChain_mean".to_string(),
                baseline_value: 0.5,
                current_value: 0.45,
                change_fraction: -0.1,
                severity: Severity::Improvement,
            },
        });
        report.safety_overhead = Some(OverheadResult {
            baseline_overhead: 0.05,
            current_overhead: 0.09,
            overhead_delta: 0.04,
            severity: Severity::Ok,
        });
        report.memory.push(MetricEntry {
            label: "64".to_string(),
            result: ComparisonResult {
                metric_name: "BM_MakeMove_MemoryTracking/64_mean".to_string(),
                baseline_value: 1000.0,
                current_value: 1000.0,
                change_fraction: 0.0,
                severity: Severity::Ok,
            },
        });

        let text = render_text(&report);
        assert!(text.contains("ShortChain     : 500.00 ns → 450.00 ns (-10.0%) [IMPROVEMENT]"));
        assert!(text.contains("Baseline overhead: 5.00%\n"));
        assert!(text.contains("Current overhead:  9.00%\n"));
        assert!(text.contains("Change:           +4.00% [OK]"));
        assert!(text.contains("Chain 64 : +0.0% throughput change [OK]"));
    }

    #[test]
    fn test_summary_lists_critical_before_warnings() {
        let mut report = empty_report();
        report.warnings.push("WARNING: w".to_string());
        report.critical_issues.push("CRITICAL: c".to_string());

        let text = render_text(&report);
        let critical = text.find("❌ CRITICAL ISSUES DETECTED:").unwrap();
        let warnings = text.find("⚠️  WARNINGS:").unwrap();
        assert!(critical < warnings);
        assert!(text.contains("\n   CRITICAL: c\n"));
        assert!(text.contains("\n   WARNING: w\n"));
        assert!(!text.contains("No performance regressions"));
    }

    #[test]
    fn test_render_json_includes_outcome() {
        let mut report = empty_report();
        report.warnings.push("WARNING: w".to_string());

        let json = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "warnings");
        assert_eq!(value["baseline"], "base.json");
        assert!(value["safety_overhead"].is_null());
    }
}
