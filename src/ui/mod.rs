// SPDX-License-Identifier: MPL-2.0
//! User-facing layer: report rendering and the interactive shell.
//!
//! - [`report`] - Report model, text and JSON rendering
//! - [`shell`] - Interaction boundary, path validation and session flow
//! - [`terminal`] - [`shell::Interaction`] over a `console` terminal

pub mod report;
pub mod shell;
pub mod terminal;
