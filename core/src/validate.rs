//! Option table validation.
//!
//! Checks structural invariants the wrapper relies on: short flags are ASCII
//! alphanumerics and never both no-argument and numeric, forwarded short
//! flags the wrapper disables are surfaced, long-option names
//! are bare names the wrapper can match, and deferred policies reference a
//! usable variable name. Findings are advisory; a table with findings still
//! renders.
//!
//! # Examples
//!
//! ```
//! use option_cull_core::*;
//!
//! let table = OptionTable::seeded(&default_baseline(), DEFAULT_SHORT_DISABLED);
//! assert!(validate_table(&table).is_empty());
//!
//! let mut bad = table.clone();
//! bad.set_policy("--verbose", PolicyCode::NoArg);
//! assert!(!validate_table(&bad).is_empty());
//! ```

use std::collections::BTreeSet;

use thiserror::Error;

use crate::{OptionTable, Policy};

/// Table validation findings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Short flag is not an ASCII letter or digit.
    #[error("invalid short flag: {0:?}")]
    InvalidShortFlag(char),
    /// Short flag is listed as both no-argument and numeric.
    #[error("short flag in both no-arg and numeric sets: {0}")]
    ConflictingShortFlag(char),
    /// Short flag the client forwards is also disabled by the wrapper.
    #[error("forwarded short flag is disabled: {0}")]
    DisabledShortFlag(char),
    /// Long-option name is empty, dashed, or carries a value.
    #[error("invalid long option name: {0:?}")]
    InvalidLongOption(String),
    /// Deferred policy references a variable the wrapper cannot evaluate.
    #[error("invalid mode variable for --{option}: {variable:?}")]
    InvalidModeVariable { option: String, variable: String },
}

/// Validates an option table, returning every finding.
pub fn validate_table(table: &OptionTable) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let flags = table
        .short_no_arg
        .iter()
        .chain(&table.short_with_num)
        .copied()
        .chain(table.short_disabled.chars());
    for flag in flags {
        if !flag.is_ascii_alphanumeric() {
            errors.push(ValidationError::InvalidShortFlag(flag));
        }
    }

    for flag in table.short_no_arg.intersection(&table.short_with_num) {
        errors.push(ValidationError::ConflictingShortFlag(*flag));
    }

    let disabled: BTreeSet<char> = table.short_disabled.chars().collect();
    let forwarded = table.short_no_arg.union(&table.short_with_num);
    for flag in forwarded.filter(|flag| disabled.contains(*flag)) {
        errors.push(ValidationError::DisabledShortFlag(*flag));
    }

    for (name, policy) in &table.long_opt {
        if !is_valid_long_name(name) {
            errors.push(ValidationError::InvalidLongOption(name.clone()));
        }
        if let Policy::Conditional(cond) = policy {
            if !is_identifier(&cond.variable) {
                errors.push(ValidationError::InvalidModeVariable {
                    option: name.clone(),
                    variable: cond.variable.clone(),
                });
            }
        }
    }

    errors
}

fn is_valid_long_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConditionalPolicy, PolicyCode, TransferMode};

    #[test]
    fn test_valid_table_has_no_findings() {
        let mut table = OptionTable::default();
        table.short_no_arg.extend(['v', 'r', 'D']);
        table.set_policy("block-size", PolicyCode::ArgCheckedOnReceive);
        table.set_policy(
            "sender",
            Policy::Conditional(ConditionalPolicy::excluded_when(
                "only",
                TransferMode::WriteOnly,
                PolicyCode::NoArg,
            )),
        );
        assert!(validate_table(&table).is_empty());
    }

    #[test]
    fn test_reports_bad_short_flags() {
        let mut table = OptionTable::default();
        table.short_disabled = "s-".to_string();
        table.short_no_arg.extend(['@', 's', 'x']);
        table.short_with_num.insert('x');

        let errors = validate_table(&table);
        assert!(errors.contains(&ValidationError::InvalidShortFlag('@')));
        assert!(errors.contains(&ValidationError::InvalidShortFlag('-')));
        assert!(errors.contains(&ValidationError::ConflictingShortFlag('x')));
        assert!(errors.contains(&ValidationError::DisabledShortFlag('s')));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_reports_forwarded_flag_that_is_disabled() {
        let mut table = OptionTable::default();
        table.short_disabled = "s".to_string();
        table.short_no_arg.extend(['s', 'v']);
        table.short_with_num.insert('B');
        assert_eq!(
            validate_table(&table),
            vec![ValidationError::DisabledShortFlag('s')]
        );

        table.short_disabled = "B".to_string();
        assert_eq!(
            validate_table(&table),
            vec![ValidationError::DisabledShortFlag('B')]
        );

        table.short_disabled.clear();
        assert!(validate_table(&table).is_empty());
    }

    #[test]
    fn test_reports_bad_long_names() {
        let mut table = OptionTable::default();
        for name in ["", "--verbose", "max-size=1k", "two words"] {
            table.set_policy(name, PolicyCode::NoArg);
        }
        let errors = validate_table(&table);
        assert_eq!(errors.len(), 4);
        assert!(
            errors
                .iter()
                .all(|e| matches!(e, ValidationError::InvalidLongOption(_)))
        );
    }

    #[test]
    fn test_reports_bad_mode_variable() {
        let mut table = OptionTable::default();
        table.set_policy(
            "remove-source-files",
            Policy::Conditional(ConditionalPolicy::excluded_when(
                "1mode",
                TransferMode::ReadOnly,
                PolicyCode::NoArg,
            )),
        );
        assert_eq!(
            validate_table(&table),
            vec![ValidationError::InvalidModeVariable {
                option: "remove-source-files".to_string(),
                variable: "1mode".to_string(),
            }]
        );
    }
}
