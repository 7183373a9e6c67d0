//! Line-by-line statement classification.
//!
//! The classifier owns the option table while scanning and carries a one-line
//! lookback: the long option introduced by the previous statement, whose
//! policy the next statement may refine.

use option_cull_core::{OptionTable, PolicyCode};
use tracing::debug;

use super::rules::{RuleKind, Statement, match_statement};
use crate::report::ScanReport;

/// Long option waiting for the statement that reveals its arity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingOption {
    #[default]
    Idle,
    Pending(String),
}

impl PendingOption {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending(name) => Some(name),
        }
    }
}

/// Scans statements into an [`OptionTable`].
///
/// # Examples
///
/// ```
/// use option_cull_core::{OptionTable, Policy, PolicyCode};
/// use option_cull_scanner::parser::Classifier;
///
/// let mut classifier = Classifier::new(OptionTable::default());
/// classifier.classify_line(r#"    args[ac++] = "--block-size";"#);
/// classifier.classify_line("    args[ac++] = blocksize_str;");
/// let (table, _report) = classifier.finish();
///
/// assert_eq!(
///     table.policy("block-size"),
///     Some(&Policy::Fixed(PolicyCode::ArgCheckedOnReceive))
/// );
/// ```
#[derive(Debug)]
pub struct Classifier {
    table: OptionTable,
    pending: PendingOption,
    report: ScanReport,
}

impl Classifier {
    pub fn new(table: OptionTable) -> Self {
        Self {
            table,
            pending: PendingOption::Idle,
            report: ScanReport::default(),
        }
    }

    pub fn pending(&self) -> &PendingOption {
        &self.pending
    }

    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    /// Classifies one source line and returns the rule that matched.
    ///
    /// Unmatched lines leave the pending option untouched.
    pub fn classify_line(&mut self, line: &str) -> Option<RuleKind> {
        let trimmed = line.trim();
        self.report.sliced_lines += 1;

        let Some((rule, statement)) = match_statement(trimmed, self.pending.is_pending()) else {
            if !trimmed.is_empty() {
                self.report.unmatched_lines.push(trimmed.to_string());
            }
            return None;
        };

        debug!(rule = rule.label(), line = trimmed, "classified statement");
        self.report.record_hit(rule);
        self.apply(statement);
        Some(rule)
    }

    /// Classifies every line in order.
    pub fn classify_lines<'a, I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.classify_line(line);
        }
    }

    /// Ends the scan, returning the table and what the scan saw.
    pub fn finish(self) -> (OptionTable, ScanReport) {
        (self.table, self.report)
    }

    fn apply(&mut self, statement: Statement) {
        match statement {
            Statement::ShortFlag(flag) => {
                self.table.short_no_arg.insert(flag);
                self.pending = PendingOption::Idle;
            }
            Statement::LongOption(name) => {
                self.table
                    .long_opt
                    .entry(name.clone())
                    .or_insert_with(|| PolicyCode::NoArg.into());
                self.pending = PendingOption::Pending(name);
            }
            Statement::FollowingValue | Statement::DestinationOption => {
                self.resolve_pending(PolicyCode::ArgCheckedOnReceive);
            }
            Statement::InlineValue => {
                self.resolve_pending(PolicyCode::ArgUnchecked);
            }
        }
    }

    fn resolve_pending(&mut self, code: PolicyCode) {
        match std::mem::take(&mut self.pending) {
            PendingOption::Pending(name) => {
                debug!(option = %name, code = code.code(), "resolved pending option");
                self.table.set_policy(&name, code);
            }
            PendingOption::Idle => {
                debug!(code = code.code(), "value statement with no pending option");
            }
        }
    }
}
