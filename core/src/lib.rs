//! Core policy types for forwarded-option tables.
//!
//! This crate defines the data a restricted wrapper (rsync's `rrsync`) needs
//! to decide which client options it lets through to the server:
//!
//! - [`PolicyCode`]: how strictly an option's argument is checked, or
//!   whether the option is excluded outright.
//! - [`Policy`]: a fixed code, or a [`ConditionalPolicy`] the wrapper
//!   resolves against its [`TransferMode`] at run time.
//! - [`OptionTable`]: short no-argument flags, short numeric flags, the
//!   always-disabled short flags, and the long-option policy map.
//! - [`DEFAULT_BASELINE`]: long options present in every table before
//!   any source is scanned.
//!
//! Validation ([`validate_table`]) reports malformed entries.
//!
//! # Example
//!
//! ```
//! use option_cull_core::*;
//!
//! let mut table = OptionTable::seeded(&default_baseline(), DEFAULT_SHORT_DISABLED);
//! table.short_no_arg.insert('v');
//! table.set_policy("block-size", PolicyCode::ArgCheckedOnReceive);
//!
//! let sender = Policy::Fixed(PolicyCode::NoArg).excluded_when("only", TransferMode::WriteOnly);
//! table.set_policy("sender", sender);
//!
//! assert_eq!(table.short_no_arg_string(), "v");
//! assert_eq!(table.conditional_count(), 1);
//! assert!(validate_table(&table).is_empty());
//! ```

mod table;
mod types;
mod validate;

pub use table::{DEFAULT_BASELINE, DEFAULT_SHORT_DISABLED, OptionTable, default_baseline};
pub use types::*;
pub use validate::{ValidationError, validate_table};
