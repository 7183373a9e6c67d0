//! Name-based policy overrides applied after scanning.
//!
//! Some options' arity cannot be read off the statements that send them, and
//! a few must be refused depending on the direction the wrapper allows. These
//! rules rewrite such entries by name.

use std::collections::BTreeMap;

use option_cull_core::{Policy, PolicyCode, TransferMode};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum NameMatch {
    Prefix(&'static str),
    Exact(&'static str),
}

impl NameMatch {
    fn matches(self, name: &str) -> bool {
        match self {
            Self::Prefix(prefix) => name.starts_with(prefix),
            Self::Exact(exact) => name == exact,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rewrite {
    Force(PolicyCode),
    ExcludeWhen(TransferMode),
}

/// Overrides in application order. Later matches overwrite earlier ones.
const OVERRIDES: &[(NameMatch, Rewrite)] = &[
    (NameMatch::Prefix("max-"), Rewrite::Force(PolicyCode::ArgUnchecked)),
    (NameMatch::Prefix("min-"), Rewrite::Force(PolicyCode::ArgUnchecked)),
    (NameMatch::Exact("files-from"), Rewrite::Force(PolicyCode::ArgAlwaysChecked)),
    (NameMatch::Prefix("remove-"), Rewrite::ExcludeWhen(TransferMode::ReadOnly)),
    (NameMatch::Prefix("log-file"), Rewrite::ExcludeWhen(TransferMode::ReadOnly)),
    (NameMatch::Exact("sender"), Rewrite::ExcludeWhen(TransferMode::WriteOnly)),
];

/// Rewrites long-option policies by name.
///
/// `mode_variable` names the wrapper variable the deferred policies test.
/// Returns the names whose policy changed. Applying the overrides again to
/// the result changes nothing.
pub fn apply_overrides(long_opt: &mut BTreeMap<String, Policy>, mode_variable: &str) -> Vec<String> {
    let mut changed = Vec::new();

    for (name, policy) in long_opt.iter_mut() {
        let before = policy.clone();
        for (matcher, rewrite) in OVERRIDES {
            if !matcher.matches(name) {
                continue;
            }
            *policy = match *rewrite {
                Rewrite::Force(code) => Policy::Fixed(code),
                Rewrite::ExcludeWhen(mode) => policy.excluded_when(mode_variable, mode),
            };
        }
        if *policy != before {
            debug!(option = %name, ?before, after = ?policy, "applied policy override");
            changed.push(name.clone());
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use option_cull_core::ConditionalPolicy;

    fn map(entries: &[(&str, PolicyCode)]) -> BTreeMap<String, Policy> {
        entries
            .iter()
            .map(|(name, code)| (name.to_string(), Policy::Fixed(*code)))
            .collect()
    }

    #[test]
    fn test_size_limits_become_unchecked() {
        let mut long_opt = map(&[
            ("max-size", PolicyCode::ArgCheckedOnReceive),
            ("min-size", PolicyCode::NoArg),
            ("max-delete", PolicyCode::ArgAlwaysChecked),
        ]);
        let changed = apply_overrides(&mut long_opt, "only");
        assert_eq!(changed.len(), 3);
        assert!(
            long_opt
                .values()
                .all(|p| *p == Policy::Fixed(PolicyCode::ArgUnchecked))
        );
    }

    #[test]
    fn test_files_from_is_always_checked() {
        let mut long_opt = map(&[("files-from", PolicyCode::ArgCheckedOnReceive)]);
        apply_overrides(&mut long_opt, "only");
        assert_eq!(long_opt["files-from"], Policy::Fixed(PolicyCode::ArgAlwaysChecked));
    }

    #[test]
    fn test_direction_dependent_options() {
        let mut long_opt = map(&[
            ("remove-source-files", PolicyCode::NoArg),
            ("log-file", PolicyCode::ArgAlwaysChecked),
            ("log-file-format", PolicyCode::ArgUnchecked),
            ("sender", PolicyCode::NoArg),
        ]);
        apply_overrides(&mut long_opt, "only");

        assert_eq!(
            long_opt["remove-source-files"],
            Policy::Conditional(ConditionalPolicy::excluded_when(
                "only",
                TransferMode::ReadOnly,
                PolicyCode::NoArg
            ))
        );
        assert_eq!(
            long_opt["log-file"],
            Policy::Conditional(ConditionalPolicy::excluded_when(
                "only",
                TransferMode::ReadOnly,
                PolicyCode::ArgAlwaysChecked
            ))
        );
        assert_eq!(
            long_opt["log-file-format"].resolve(TransferMode::WriteOnly),
            PolicyCode::ArgUnchecked
        );
        assert_eq!(
            long_opt["sender"],
            Policy::Conditional(ConditionalPolicy::excluded_when(
                "only",
                TransferMode::WriteOnly,
                PolicyCode::NoArg
            ))
        );
    }

    #[test]
    fn test_unrelated_names_are_untouched() {
        let mut long_opt = map(&[
            ("server", PolicyCode::NoArg),
            ("maximum", PolicyCode::NoArg),
            ("files-from-x", PolicyCode::ArgCheckedOnReceive),
        ]);
        let before = long_opt.clone();
        assert!(apply_overrides(&mut long_opt, "only").is_empty());
        assert_eq!(long_opt, before);
    }

    #[test]
    fn test_overrides_are_idempotent() {
        let mut long_opt = map(&[
            ("max-size", PolicyCode::ArgCheckedOnReceive),
            ("remove-source-files", PolicyCode::NoArg),
            ("sender", PolicyCode::NoArg),
        ]);
        apply_overrides(&mut long_opt, "only");
        let once = long_opt.clone();
        assert!(apply_overrides(&mut long_opt, "only").is_empty());
        assert_eq!(long_opt, once);
    }

    #[test]
    fn test_custom_mode_variable() {
        let mut long_opt = map(&[("sender", PolicyCode::NoArg)]);
        apply_overrides(&mut long_opt, "mode");
        let Policy::Conditional(cond) = &long_opt["sender"] else {
            panic!("sender should be conditional");
        };
        assert_eq!(cond.variable, "mode");
    }
}
