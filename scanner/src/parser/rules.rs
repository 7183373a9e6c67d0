//! Statement rules for the option-registration function.
//!
//! Each [`RuleKind`] pairs a pattern with an extractor. Rules are tried in
//! [`RuleKind::ORDERED`] order against a trimmed line and the first match
//! wins. Patterns are anchored at the start of the line.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Compiled statement patterns.
static PATTERNS: LazyLock<StatementPatterns> = LazyLock::new(StatementPatterns::new);

struct StatementPatterns {
    // argstr[x++] = 'v';  ('.', 'i' and 'e' belong to the -e protocol string)
    short_flag_literal: Regex,
    // asprintf(&arg, "-B%u", ...)
    short_flag_formatted: Regex,
    // args[ac++] = "--backup-dir";
    long_option: Regex,
    // args[ac++] = backup_dir;
    following_value: Regex,
    // return "--compare-dest";
    destination_return: Regex,
    // asprintf(&arg, "--timeout=%d", ...)
    inline_value_asprintf: Regex,
    // fmt = ... : "--modify-window=%d";
    inline_value_fmt: Regex,
}

impl StatementPatterns {
    fn new() -> Self {
        // All regexes here are compile-time constants. An expect() failure indicates
        // a programmer error in the pattern, not a runtime condition.
        Self {
            short_flag_literal: Regex::new(r"^argstr\[x\+\+\] = '([^.ie])'")
                .expect("static regex must compile"),
            short_flag_formatted: Regex::new(r#"^asprintf\([^,]+, "-([a-zA-Z0-9])%l?[ud]""#)
                .expect("static regex must compile"),
            long_option: Regex::new(r#"^args\[ac\+\+\] = "--([^"=]+)""#)
                .expect("static regex must compile"),
            following_value: Regex::new(r#"^args\[ac\+\+\] = [^\["\s]+;"#)
                .expect("static regex must compile"),
            destination_return: Regex::new(r#"^return "--[^"]+-dest";"#)
                .expect("static regex must compile"),
            inline_value_asprintf: Regex::new(r#"^asprintf\([^,]+, "--[^"=]+="#)
                .expect("static regex must compile"),
            inline_value_fmt: Regex::new(r#"^fmt = .*: "--[^"=]+="#)
                .expect("static regex must compile"),
        }
    }
}

/// The statement shapes the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// A character literal stored into the short-option string.
    ShortFlagLiteral,
    /// A short option formatted together with a numeric value.
    ShortFlagFormatted,
    /// A literal `--name` appended to the argument list.
    LongOptionIntroduced,
    /// A non-literal value appended right after a long option.
    LongOptionValue,
    /// A `return "--*-dest";` from the alternate-destination helper.
    DestinationReturn,
    /// A long option formatted with an embedded `=value`.
    InlineValue,
}

/// What a matched line means for the option table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A short option forwarded without an argument.
    ShortFlag(char),
    /// A long option; it becomes the pending option.
    LongOption(String),
    /// The pending option is followed by a value checked on receive.
    FollowingValue,
    /// The pending option names a destination directory.
    DestinationOption,
    /// The pending option carries its value inline.
    InlineValue,
}

impl RuleKind {
    /// Rules in evaluation order.
    pub const ORDERED: [RuleKind; 6] = [
        RuleKind::ShortFlagLiteral,
        RuleKind::ShortFlagFormatted,
        RuleKind::LongOptionIntroduced,
        RuleKind::LongOptionValue,
        RuleKind::DestinationReturn,
        RuleKind::InlineValue,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ShortFlagLiteral => "short-flag-literal",
            Self::ShortFlagFormatted => "short-flag-formatted",
            Self::LongOptionIntroduced => "long-option",
            Self::LongOptionValue => "long-option-value",
            Self::DestinationReturn => "destination-return",
            Self::InlineValue => "inline-value",
        }
    }

    /// Whether the rule only applies while a long option is pending.
    pub const fn needs_pending(self) -> bool {
        matches!(self, Self::LongOptionValue)
    }

    /// Applies this rule to a trimmed line.
    pub fn extract(self, line: &str) -> Option<Statement> {
        let patterns = &*PATTERNS;
        match self {
            Self::ShortFlagLiteral => capture_char(&patterns.short_flag_literal, line)
                .map(Statement::ShortFlag),
            Self::ShortFlagFormatted => capture_char(&patterns.short_flag_formatted, line)
                .map(Statement::ShortFlag),
            Self::LongOptionIntroduced => patterns
                .long_option
                .captures(line)
                .map(|caps| Statement::LongOption(caps[1].to_string())),
            Self::LongOptionValue => patterns
                .following_value
                .is_match(line)
                .then_some(Statement::FollowingValue),
            Self::DestinationReturn => patterns
                .destination_return
                .is_match(line)
                .then_some(Statement::DestinationOption),
            Self::InlineValue => (patterns.inline_value_asprintf.is_match(line)
                || patterns.inline_value_fmt.is_match(line))
            .then_some(Statement::InlineValue),
        }
    }
}

fn capture_char(re: &Regex, line: &str) -> Option<char> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
}

/// Finds the first rule matching `line`.
///
/// `pending` says whether a long option is waiting for its value; rules that
/// need one are skipped otherwise.
pub fn match_statement(line: &str, pending: bool) -> Option<(RuleKind, Statement)> {
    RuleKind::ORDERED
        .into_iter()
        .filter(|rule| pending || !rule.needs_pending())
        .find_map(|rule| rule.extract(line).map(|statement| (rule, statement)))
}
