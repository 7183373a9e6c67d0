//! Extraction of forwardable rsync options from `options.c`.
//!
//! rsync's client builds the server's command line in `server_options()`.
//! This crate scans that function's source text, works out which short and
//! long options it can send and how each option's argument should be vetted,
//! and renders the result as the option table the `rrsync` restricted-shell
//! wrapper includes.
//!
//! # Main entry points
//!
//! - [`scan_source`]: scan source text already in memory.
//! - [`scan_file`]: read a file and scan it.
//! - [`output::format_table`]: render a table as rrsync Python, JSON or YAML.
//!
//! # Example
//!
//! ```
//! use option_cull_scanner::config::ScanConfig;
//! use option_cull_scanner::output::table_to_rrsync;
//! use option_cull_scanner::scan_source;
//!
//! let source = "\
//! void server_options(char **args, int *argc_p)
//! {
//! \targstr[x++] = 'v';
//! \tif (block_size) {
//! \t\targs[ac++] = \"--block-size\";
//! \t\targs[ac++] = blocksize_str;
//! \t}
//! }
//! ";
//!
//! let outcome = scan_source(source, &ScanConfig::default());
//! let text = table_to_rrsync(&outcome.table);
//! assert!(text.contains("short_no_arg = \"v\""));
//! assert!(text.contains("\"block-size\": 2,"));
//! ```
//!
//! A file without the function yields the baseline table. Only I/O or
//! serialization failures are errors.

pub mod config;
mod error;
pub mod output;
pub mod parser;
pub mod report;

use std::path::Path;

use option_cull_core::OptionTable;

pub use error::{Result, ScanError};
use config::ScanConfig;
use report::ScanReport;

/// Result of one scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub table: OptionTable,
    pub report: ScanReport,
}

/// Scans source text into an option table.
pub fn scan_source(source: &str, config: &ScanConfig) -> ScanOutcome {
    let (table, report) = parser::parse_server_options(source, config);
    ScanOutcome { table, report }
}

/// Reads and scans a source file.
///
/// # Errors
///
/// Returns [`ScanError::Io`] if the file cannot be read. Nothing is scanned
/// in that case.
pub fn scan_file(path: impl AsRef<Path>, config: &ScanConfig) -> Result<ScanOutcome> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read source file");
    Ok(scan_source(&source, config))
}
