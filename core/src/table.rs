use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Policy, PolicyCode};

/// Short flags the wrapper always refuses, whatever the scan finds.
pub const DEFAULT_SHORT_DISABLED: &str = "s";

/// Long options seeded into every table before scanning.
///
/// Besides what stock rsync sends, this covers options used by other
/// clients of the wrapper (BackupPC sends several of them). Scanning may
/// overwrite these entries but never removes them.
pub const DEFAULT_BASELINE: &[(&str, PolicyCode)] = &[
    ("block-size", PolicyCode::ArgUnchecked),
    ("daemon", PolicyCode::Excluded),
    ("debug", PolicyCode::ArgUnchecked),
    ("fake-super", PolicyCode::NoArg),
    ("fuzzy", PolicyCode::NoArg),
    ("group", PolicyCode::NoArg),
    ("hard-links", PolicyCode::NoArg),
    ("ignore-times", PolicyCode::NoArg),
    ("info", PolicyCode::ArgUnchecked),
    ("links", PolicyCode::NoArg),
    ("log-file", PolicyCode::ArgAlwaysChecked),
    ("one-file-system", PolicyCode::NoArg),
    ("owner", PolicyCode::NoArg),
    ("perms", PolicyCode::NoArg),
    ("recursive", PolicyCode::NoArg),
    ("times", PolicyCode::NoArg),
    ("write-devices", PolicyCode::Excluded),
];

/// Returns [`DEFAULT_BASELINE`] as an owned map.
pub fn default_baseline() -> BTreeMap<String, PolicyCode> {
    DEFAULT_BASELINE
        .iter()
        .map(|(name, code)| ((*name).to_string(), *code))
        .collect()
}

/// Everything the wrapper needs to vet forwarded options.
///
/// Sets and maps are ordered so that rendering the same table twice yields
/// identical text.
///
/// # Examples
///
/// ```
/// use option_cull_core::*;
///
/// let mut table = OptionTable::seeded(&default_baseline(), DEFAULT_SHORT_DISABLED);
/// assert_eq!(table.policy("daemon"), Some(&Policy::Fixed(PolicyCode::Excluded)));
///
/// table.short_no_arg.insert('v');
/// table.short_no_arg.insert('a');
/// table.short_no_arg.insert('v');
/// assert_eq!(table.short_no_arg_string(), "av");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTable {
    /// Short flags the wrapper refuses regardless of the scan.
    pub short_disabled: String,
    /// Short flags forwarded without an argument.
    pub short_no_arg: BTreeSet<char>,
    /// Short flags forwarded with a numeric argument.
    pub short_with_num: BTreeSet<char>,
    /// Long options keyed by name without the leading dashes.
    pub long_opt: BTreeMap<String, Policy>,
}

impl OptionTable {
    /// Creates a table holding only the given baseline long options.
    pub fn seeded(baseline: &BTreeMap<String, PolicyCode>, short_disabled: &str) -> Self {
        Self {
            short_disabled: short_disabled.to_string(),
            short_no_arg: BTreeSet::new(),
            short_with_num: BTreeSet::new(),
            long_opt: baseline
                .iter()
                .map(|(name, code)| (name.clone(), Policy::Fixed(*code)))
                .collect(),
        }
    }

    /// Returns the policy for a long option, if the table has one.
    pub fn policy(&self, name: &str) -> Option<&Policy> {
        self.long_opt.get(name)
    }

    /// Sets the policy for a long option, replacing any previous entry.
    pub fn set_policy(&mut self, name: &str, policy: impl Into<Policy>) {
        self.long_opt.insert(name.to_string(), policy.into());
    }

    /// Sorted, concatenated no-argument short flags.
    pub fn short_no_arg_string(&self) -> String {
        self.short_no_arg.iter().collect()
    }

    /// Sorted, concatenated numeric short flags.
    pub fn short_with_num_string(&self) -> String {
        self.short_with_num.iter().collect()
    }

    pub fn conditional_count(&self) -> usize {
        self.long_opt.values().filter(|p| p.is_conditional()).count()
    }
}
