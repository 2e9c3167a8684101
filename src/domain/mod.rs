// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability.
//!
//! # Modules
//!
//! - [`metadata`]: Tag tables, tag registry and location resolution
//!   ([`TagTable`](metadata::TagTable), [`Coordinate`](metadata::Coordinate))

pub mod metadata;
