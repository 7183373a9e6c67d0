//! Heuristic scanner for rsync's `server_options()`.
//!
//! The scan runs in three fixed stages:
//!
//! 1. [`slice_function_body`] cuts the function out of the source file by
//!    its signature prefix and the first column-zero `}`.
//! 2. [`Classifier`] matches each line against the ordered [`RuleKind`]
//!    table, collecting short flags and long-option policies.
//! 3. [`apply_overrides`] rewrites policies that depend on the option name
//!    rather than on how the option is sent.
//!
//! This is pattern matching over a known code shape, not C parsing:
//! preprocessor conditionals are ignored and every branch is scanned.

mod classify;
mod overrides;
pub mod rules;
mod slice;

use option_cull_core::OptionTable;
use tracing::{debug, warn};

pub use classify::{Classifier, PendingOption};
pub use overrides::apply_overrides;
pub use rules::{RuleKind, Statement};
pub use slice::{FunctionBody, SourceLine, slice_function_body};

use crate::config::ScanConfig;
use crate::report::ScanReport;

/// Scans source text into an option table.
///
/// The table is seeded from `config.baseline`, filled from the sliced
/// function body, then passed through the name overrides. A missing marker
/// is reported in the [`ScanReport`], not as an error.
pub fn parse_server_options(source: &str, config: &ScanConfig) -> (OptionTable, ScanReport) {
    let body = slice_function_body(source, &config.marker);
    if !body.marker_found() {
        warn!(marker = %config.marker, "function marker not found");
    } else if !body.terminated {
        warn!(marker = %config.marker, "function body has no closing brace line");
    }
    debug!(
        lines = body.lines.len(),
        marker_line = ?body.marker_line,
        "sliced function body"
    );

    let mut classifier = Classifier::new(OptionTable::seeded(&config.baseline, &config.short_disabled));
    classifier.classify_lines(body.lines.iter().map(|line| line.text.as_str()));
    let (mut table, mut report) = classifier.finish();

    report.marker_found = body.marker_found();
    report.marker_line = body.marker_line.map(|index| index + 1);
    report.terminated = body.terminated;
    report.overridden = apply_overrides(&mut table.long_opt, &config.mode_variable);

    (table, report)
}
