use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use option_cull_core::validate_table;
use option_cull_scanner::config::{DEFAULT_OPTIONS_PATH, ScanConfig};
use option_cull_scanner::output::{OutputFormat, format_table};
use option_cull_scanner::scan_file;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Extract server options from options.c.
///
/// Prints Python code for every option options.c might send to the server.
/// The rrsync script includes this code. The scanner does not understand
/// #ifdef, so every branch counts.
#[derive(Debug, Parser)]
#[command(name = "cull-options")]
#[command(version)]
struct Cli {
    /// Path to rsync's options.c.
    #[arg(default_value = DEFAULT_OPTIONS_PATH)]
    options_path: PathBuf,
    /// Log scan diagnostics to stderr.
    #[arg(short, long)]
    verbose: bool,
    /// YAML scan configuration (marker, baseline, disabled flags).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value = "rrsync")]
    format: OutputFormat,
    /// Also print the scan report as JSON on stderr.
    #[arg(long)]
    with_report: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_level(true)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => ScanConfig::load(path).map_err(|err| err.to_string())?,
        None => ScanConfig::default(),
    };

    let outcome = scan_file(&cli.options_path, &config).map_err(|err| err.to_string())?;
    let report = &outcome.report;

    for warning in report.warnings(&config.marker) {
        warn!("{warning}");
    }
    for finding in validate_table(&outcome.table) {
        warn!(%finding, "option table validation");
    }
    debug!(
        sliced = report.sliced_lines,
        recognized = report.recognized_lines,
        coverage = report.coverage(),
        short_no_arg = %outcome.table.short_no_arg_string(),
        long_options = outcome.table.long_opt.len(),
        overridden = report.overridden.len(),
        "scan complete"
    );

    if cli.with_report {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        eprintln!("{json}");
    }

    let rendered = format_table(&outcome.table, cli.format).map_err(|err| err.to_string())?;
    print!("{rendered}");
    Ok(())
}
