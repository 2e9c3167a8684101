// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Output**: colour and report format
//! - **Shell**: interactive session presentation and file filter
//! - **Logging**: default log filter directives

// ==========================================================================
// Output Defaults
// ==========================================================================

/// Coloured text output when stdout is a terminal.
pub const DEFAULT_COLOR: bool = true;

// ==========================================================================
// Shell Defaults
// ==========================================================================

/// Print the banner at the top of each interactive screen.
pub const DEFAULT_SHOW_BANNER: bool = true;

/// Clear the terminal before the banner.
pub const DEFAULT_CLEAR_SCREEN: bool = true;

/// Extensions accepted by the interactive file filter (lowercase, no dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter used with `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "debug";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_EXTENSIONS.is_empty());
    assert!(!DEFAULT_LOG_FILTER.is_empty());
    assert!(!VERBOSE_LOG_FILTER.is_empty());
};
