//! Basic server_options scanning example.
//!
//! Demonstrates how to use `scan_source()` to build an option table from
//! source text already in memory, inspect the scan report, and render the
//! table the way rrsync includes it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p option-cull-scanner --example scan_options
//! ```

use option_cull_core::{Policy, TransferMode};
use option_cull_scanner::config::ScanConfig;
use option_cull_scanner::output::table_to_rrsync;
use option_cull_scanner::parser::RuleKind;
use option_cull_scanner::scan_source;

fn main() {
    // A trimmed server_options() body
    let source = r#"
static void usage(void)
{
	rprintf(FINFO, "usage\n");
}

void server_options(char **args, int *argc_p)
{
	int ac = *argc_p;
	char *arg;

	if (am_sender)
		args[ac++] = "--sender";

	argstr[x++] = 'v';
	argstr[x++] = 'r';
	if (do_compression)
		argstr[x++] = 'z';

	if (block_size) {
		if (asprintf(&arg, "-B%u", block_size) < 0)
			goto oom;
		args[ac++] = arg;
	}

	if (max_size_arg) {
		args[ac++] = "--max-size";
		args[ac++] = max_size_arg;
	}

	if (backup_dir) {
		args[ac++] = "--backup-dir";
		args[ac++] = safe_arg("", backup_dir);
	}

	if (remove_source_files)
		args[ac++] = "--remove-source-files";

	*argc_p = ac;
}
"#;

    let outcome = scan_source(source, &ScanConfig::default());
    let report = &outcome.report;

    println!("Marker found: {}", report.marker_found);
    println!(
        "Recognized {} of {} lines ({:.0}%)",
        report.recognized_lines,
        report.sliced_lines,
        report.coverage() * 100.0
    );

    println!("\nRule hits:");
    for rule in RuleKind::ORDERED {
        println!("  {:<24} {}", rule.label(), report.hits(rule));
    }

    // Direction-dependent options resolve differently per transfer mode
    println!("\nPer-mode policies:");
    for (name, policy) in &outcome.table.long_opt {
        if let Policy::Conditional(_) = policy {
            println!(
                "  --{name}: read-only {}, write-only {}",
                policy.resolve(TransferMode::ReadOnly),
                policy.resolve(TransferMode::WriteOnly)
            );
        }
    }

    println!("\n--- rrsync table ---");
    print!("{}", table_to_rrsync(&outcome.table));
}
