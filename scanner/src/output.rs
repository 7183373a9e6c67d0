//! Output formatting for option tables.

use option_cull_core::{OptionTable, Policy};

use crate::error::Result;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Python source included verbatim by the rrsync wrapper.
    #[default]
    Rrsync,
    Json,
    Yaml,
}

const RRSYNC_HEADER: &str = "\
# These options are the only options that rsync might send to the server,
# and only in the option format that the stock rsync produces.
";

const LONG_OPT_LEGEND: &str = "\
# To disable a long-named option, change its value to a -1.  The values mean:
# 0 = the option has no arg; 1 = the arg doesn't need any checking; 2 = only
# check the arg when receiving; and 3 = always check the arg.
";

/// Formats a table in the requested output format.
pub fn format_table(table: &OptionTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Rrsync => Ok(table_to_rrsync(table)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(table)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(table)?),
    }
}

/// Renders the table as the Python fragment rrsync includes.
///
/// Strings are JSON-quoted, which is also valid Python. Deferred policies are
/// written as conditional expressions over the wrapper's mode variable.
pub fn table_to_rrsync(table: &OptionTable) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(RRSYNC_HEADER);
    out.push('\n');

    out.push_str("# To disable a short-named option, add its letter to this string:\n");
    out.push_str(&format!(
        "short_disabled = {}\n",
        single_quote(&table.short_disabled)
    ));
    out.push('\n');

    out.push_str(&format!(
        "short_no_arg = {}      # DO NOT REMOVE ANY\n",
        quote(&table.short_no_arg_string())
    ));
    out.push_str(&format!(
        "short_with_num = {}  # DO NOT REMOVE ANY\n",
        quote(&table.short_with_num_string())
    ));
    out.push('\n');

    out.push_str(LONG_OPT_LEGEND);
    out.push_str("long_opt = {\n");
    for (name, policy) in &table.long_opt {
        out.push_str(&format!("  {}: {},\n", quote(name), policy_expression(policy)));
    }
    out.push_str("}\n");

    out
}

/// Renders one policy as a Python expression.
pub fn policy_expression(policy: &Policy) -> String {
    match policy {
        Policy::Fixed(code) => code.code().to_string(),
        Policy::Conditional(cond) => format!(
            "{} if {} == {} else {}",
            cond.then.code(),
            cond.variable,
            quote(cond.equals.as_str()),
            cond.otherwise.code()
        ),
    }
}

fn quote(text: &str) -> String {
    // Serializing a str cannot fail.
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Python single-quoted literal, the shape rrsync uses for `short_disabled`.
fn single_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use option_cull_core::{
        ConditionalPolicy, DEFAULT_SHORT_DISABLED, PolicyCode, TransferMode, default_baseline,
    };

    fn sample_table() -> OptionTable {
        let mut table = OptionTable::seeded(&default_baseline(), DEFAULT_SHORT_DISABLED);
        table.short_no_arg.extend(['v', 'r', 'D', 'l']);
        table.set_policy("block-size", PolicyCode::ArgCheckedOnReceive);
        table.set_policy(
            "sender",
            Policy::Conditional(ConditionalPolicy::excluded_when(
                "only",
                TransferMode::WriteOnly,
                PolicyCode::NoArg,
            )),
        );
        table
    }

    #[test]
    fn test_policy_expression_fixed() {
        assert_eq!(policy_expression(&Policy::Fixed(PolicyCode::Excluded)), "-1");
        assert_eq!(policy_expression(&Policy::Fixed(PolicyCode::ArgAlwaysChecked)), "3");
    }

    #[test]
    fn test_policy_expression_conditional() {
        let policy = Policy::Fixed(PolicyCode::NoArg).excluded_when("only", TransferMode::WriteOnly);
        assert_eq!(policy_expression(&policy), r#"-1 if only == "w" else 0"#);
    }

    #[test]
    fn test_rrsync_layout() {
        let out = table_to_rrsync(&sample_table());
        assert!(out.starts_with("\n# These options are the only options"));
        assert!(out.contains("short_disabled = 's'\n"));
        assert!(out.contains("short_no_arg = \"Dlrv\"      # DO NOT REMOVE ANY\n"));
        assert!(out.contains("short_with_num = \"\"  # DO NOT REMOVE ANY\n"));
        assert!(out.contains("  \"block-size\": 2,\n"));
        assert!(out.contains("  \"daemon\": -1,\n"));
        assert!(out.contains("  \"sender\": -1 if only == \"w\" else 0,\n"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_rrsync_long_options_are_sorted() {
        let out = table_to_rrsync(&sample_table());
        let names: Vec<&str> = out
            .lines()
            .filter_map(|line| line.strip_prefix("  \""))
            .filter_map(|rest| rest.split('"').next())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), default_baseline().len() + 1);
    }

    #[test]
    fn test_format_table_json() {
        let out = format_table(&sample_table(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["long_opt"]["block-size"]["fixed"], 2);
        assert_eq!(parsed["long_opt"]["sender"]["conditional"]["equals"], "write_only");
        assert_eq!(parsed["short_no_arg"][0], "D");
    }

    #[test]
    fn test_format_table_yaml() {
        let out = format_table(&sample_table(), OutputFormat::Yaml).unwrap();
        assert!(out.contains("short_disabled: s"));
        assert!(out.contains("block-size:"));
    }

    #[test]
    fn test_short_disabled_is_escaped() {
        let mut table = sample_table();
        table.short_disabled = r"s'\".to_string();
        let out = table_to_rrsync(&table);
        assert!(out.contains(r"short_disabled = 's\'\\'"), "{out}");

        table.short_disabled.clear();
        assert!(table_to_rrsync(&table).contains("short_disabled = ''\n"));
    }

    #[cfg(feature = "clap")]
    #[test]
    fn test_output_format_value_names() {
        use clap::ValueEnum;

        let names: Vec<String> = OutputFormat::value_variants()
            .iter()
            .filter_map(ValueEnum::to_possible_value)
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(names, ["rrsync", "json", "yaml"]);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let table = sample_table();
        assert_eq!(table_to_rrsync(&table), table_to_rrsync(&table.clone()));
    }
}
