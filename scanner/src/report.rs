//! Scan diagnostics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parser::rules::RuleKind;

/// What one scan saw, for logging and tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub marker_found: bool,
    /// 1-based line number of the function signature.
    pub marker_line: Option<usize>,
    /// Whether a closing `}` line ended the slice.
    pub terminated: bool,
    pub sliced_lines: usize,
    pub recognized_lines: usize,
    pub rule_hits: BTreeMap<RuleKind, usize>,
    /// Non-blank sliced lines no rule matched.
    pub unmatched_lines: Vec<String>,
    /// Long options whose policy the post-processor changed.
    pub overridden: Vec<String>,
}

impl ScanReport {
    pub fn coverage(&self) -> f64 {
        if self.sliced_lines == 0 {
            return 0.0;
        }
        self.recognized_lines as f64 / self.sliced_lines as f64
    }

    pub fn hits(&self, rule: RuleKind) -> usize {
        self.rule_hits.get(&rule).copied().unwrap_or(0)
    }

    pub(crate) fn record_hit(&mut self, rule: RuleKind) {
        self.recognized_lines += 1;
        *self.rule_hits.entry(rule).or_insert(0) += 1;
    }

    /// Human-readable warnings about a degraded scan.
    pub fn warnings(&self, marker: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.marker_found {
            warnings.push(format!(
                "No line starts with {marker:?}; only the baseline options were emitted"
            ));
        } else if !self.terminated {
            warnings.push(
                "No closing '}' line after the function signature; scanned to end of input"
                    .to_string(),
            );
        }

        if self.marker_found && self.recognized_lines == 0 {
            warnings.push("Function body contained no recognizable option statements".to_string());
        }

        warnings
    }
}
