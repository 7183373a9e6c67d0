//! Scan configuration.
//!
//! Controls where the scanner looks for the option-registration function,
//! which long options are seeded before scanning, and how the rendered table
//! names the wrapper's transfer-mode variable. Every field has a default, so
//! a configuration file only needs the fields it changes.
//!
//! # Example YAML
//!
//! ```yaml
//! marker: "void server_options"
//! short_disabled: "s"
//! mode_variable: "only"
//! baseline:
//!   block-size: 1
//!   daemon: -1
//!   log-file: 3
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use option_cull_core::{
    DEFAULT_MODE_VARIABLE, DEFAULT_SHORT_DISABLED, PolicyCode, default_baseline,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Prefix of the signature line that starts the scanned function.
pub const DEFAULT_MARKER: &str = "void server_options";

/// Path scanned when none is given, relative to rsync's `packaging/` directory.
pub const DEFAULT_OPTIONS_PATH: &str = "../options.c";

/// Settings for one scan.
///
/// # Examples
///
/// ```
/// use option_cull_scanner::config::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.marker, "void server_options");
/// assert_eq!(config.mode_variable, "only");
/// assert!(config.baseline.contains_key("log-file"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Prefix of the function signature line to slice from.
    pub marker: String,
    /// Short flags the wrapper always refuses.
    pub short_disabled: String,
    /// Wrapper variable holding the transfer mode.
    pub mode_variable: String,
    /// Long options seeded before scanning.
    pub baseline: BTreeMap<String, PolicyCode>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            short_disabled: DEFAULT_SHORT_DISABLED.to_string(),
            mode_variable: DEFAULT_MODE_VARIABLE.to_string(),
            baseline: default_baseline(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Io`] if the file cannot be read, or
    /// [`ScanError::Yaml`] if it does not parse (including unknown policy
    /// codes in the baseline).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Replaces the seeded long options.
    pub fn with_baseline<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PolicyCode)>,
        S: Into<String>,
    {
        self.baseline = entries
            .into_iter()
            .map(|(name, code)| (name.into(), code))
            .collect();
        self
    }
}
