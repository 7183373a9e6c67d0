//! Policy type definitions for forwarded-option validation.
//!
//! This module defines the values stored in a long-option table: the integer
//! policy codes understood by the restricted wrapper, and deferred policies
//! whose outcome depends on the wrapper's transfer mode. The types serialize
//! with [`serde`] so tables can be written to JSON or YAML as well as to the
//! wrapper's own include format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the wrapper variable that holds the transfer mode.
pub const DEFAULT_MODE_VARIABLE: &str = "only";

/// How strictly the wrapper must check a forwarded option.
///
/// Each variant maps to the integer code the wrapper expects. serde
/// (de)serializes the integer, so a baseline written as `daemon: -1` in YAML
/// becomes [`PolicyCode::Excluded`].
///
/// # Examples
///
/// ```
/// use option_cull_core::PolicyCode;
///
/// assert_eq!(PolicyCode::ArgCheckedOnReceive.code(), 2);
/// assert_eq!(PolicyCode::from_code(-1), Some(PolicyCode::Excluded));
/// assert_eq!(PolicyCode::from_code(7), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PolicyCode {
    /// The option must never be forwarded.
    Excluded,
    /// The option takes no argument.
    NoArg,
    /// The option takes an argument that needs no checking.
    ArgUnchecked,
    /// The argument is only checked when the wrapper is receiving.
    ArgCheckedOnReceive,
    /// The argument is always checked.
    ArgAlwaysChecked,
}

impl PolicyCode {
    /// Returns the integer code written into the wrapper table.
    pub const fn code(self) -> i64 {
        match self {
            Self::Excluded => -1,
            Self::NoArg => 0,
            Self::ArgUnchecked => 1,
            Self::ArgCheckedOnReceive => 2,
            Self::ArgAlwaysChecked => 3,
        }
    }

    /// Parses an integer code, returning `None` for values the wrapper does
    /// not define.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Excluded),
            0 => Some(Self::NoArg),
            1 => Some(Self::ArgUnchecked),
            2 => Some(Self::ArgCheckedOnReceive),
            3 => Some(Self::ArgAlwaysChecked),
            _ => None,
        }
    }
}

impl TryFrom<i64> for PolicyCode {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown policy code {code} (expected -1..=3)"))
    }
}

impl From<PolicyCode> for i64 {
    fn from(code: PolicyCode) -> Self {
        code.code()
    }
}

impl fmt::Display for PolicyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Transfer mode the wrapper is restricted to at run time.
///
/// Deferred policies compare the wrapper's mode variable against one of
/// these values.
///
/// # Examples
///
/// ```
/// use option_cull_core::TransferMode;
///
/// assert_eq!(TransferMode::ReadOnly.as_str(), "r");
/// assert_eq!(TransferMode::WriteOnly.as_str(), "w");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    /// The wrapper only lets the client read (the server sends).
    ReadOnly,
    /// The wrapper only lets the client write (the server receives).
    WriteOnly,
}

impl TransferMode {
    /// Returns the literal the wrapper stores in its mode variable.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "r",
            Self::WriteOnly => "w",
        }
    }
}

/// A policy resolved by the wrapper against its transfer mode.
///
/// Reads as `then if <variable> == "<equals>" else otherwise`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalPolicy {
    /// Free variable holding the transfer mode in the wrapper.
    pub variable: String,
    /// Mode that selects `then`.
    pub equals: TransferMode,
    /// Policy when the mode matches.
    pub then: PolicyCode,
    /// Policy in every other mode.
    pub otherwise: PolicyCode,
}

impl ConditionalPolicy {
    /// Creates a policy that excludes the option in `mode` and keeps
    /// `otherwise` elsewhere.
    pub fn excluded_when(
        variable: impl Into<String>,
        mode: TransferMode,
        otherwise: PolicyCode,
    ) -> Self {
        Self {
            variable: variable.into(),
            equals: mode,
            then: PolicyCode::Excluded,
            otherwise,
        }
    }

    /// Resolves the policy for a concrete mode.
    pub fn resolve(&self, mode: TransferMode) -> PolicyCode {
        if mode == self.equals {
            self.then
        } else {
            self.otherwise
        }
    }
}

/// Policy for one long option.
///
/// # Examples
///
/// ```
/// use option_cull_core::{Policy, PolicyCode, TransferMode};
///
/// let fixed = Policy::Fixed(PolicyCode::NoArg);
/// assert_eq!(fixed.fallback_code(), PolicyCode::NoArg);
///
/// let sender = fixed.excluded_when("only", TransferMode::WriteOnly);
/// assert_eq!(sender.resolve(TransferMode::WriteOnly), PolicyCode::Excluded);
/// assert_eq!(sender.resolve(TransferMode::ReadOnly), PolicyCode::NoArg);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// A code known when the table is generated.
    Fixed(PolicyCode),
    /// A code the wrapper picks once it knows its transfer mode.
    Conditional(ConditionalPolicy),
}

impl Policy {
    /// Returns the code that applies when no mode condition holds.
    pub fn fallback_code(&self) -> PolicyCode {
        match self {
            Self::Fixed(code) => *code,
            Self::Conditional(cond) => cond.otherwise,
        }
    }

    /// Wraps this policy so it is excluded in `mode`.
    ///
    /// An already conditional policy keeps its fallback code, so applying
    /// the same wrap twice gives the same result.
    pub fn excluded_when(&self, variable: &str, mode: TransferMode) -> Self {
        Self::Conditional(ConditionalPolicy::excluded_when(
            variable,
            mode,
            self.fallback_code(),
        ))
    }

    /// Resolves the policy for a concrete mode.
    pub fn resolve(&self, mode: TransferMode) -> PolicyCode {
        match self {
            Self::Fixed(code) => *code,
            Self::Conditional(cond) => cond.resolve(mode),
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::Conditional(_))
    }
}

impl From<PolicyCode> for Policy {
    fn from(code: PolicyCode) -> Self {
        Self::Fixed(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_code_round_trips_through_integers() {
        for code in -1..=3 {
            let policy = PolicyCode::from_code(code).expect("defined code");
            assert_eq!(policy.code(), code);
        }
        assert!(PolicyCode::try_from(4).is_err());
    }

    #[test]
    fn test_policy_code_serializes_as_integer() {
        let json = serde_json::to_string(&PolicyCode::ArgAlwaysChecked).unwrap();
        assert_eq!(json, "3");
        let parsed: PolicyCode = serde_json::from_str("-1").unwrap();
        assert_eq!(parsed, PolicyCode::Excluded);
        assert!(serde_json::from_str::<PolicyCode>("9").is_err());
    }

    #[test]
    fn test_excluded_when_keeps_fallback_of_conditional() {
        let log_file = Policy::Fixed(PolicyCode::ArgAlwaysChecked)
            .excluded_when("only", TransferMode::ReadOnly);
        let again = log_file.excluded_when("only", TransferMode::ReadOnly);
        assert_eq!(log_file, again);
        assert_eq!(again.fallback_code(), PolicyCode::ArgAlwaysChecked);
    }

    #[test]
    fn test_conditional_resolves_per_mode() {
        let cond = ConditionalPolicy::excluded_when("only", TransferMode::ReadOnly, PolicyCode::NoArg);
        assert_eq!(cond.resolve(TransferMode::ReadOnly), PolicyCode::Excluded);
        assert_eq!(cond.resolve(TransferMode::WriteOnly), PolicyCode::NoArg);
    }
}
