// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! Pure types and rules for EXIF metadata, free of codec dependencies:
//! - [`TagTable`], [`TagKey`], [`TagValue`]: resolved tag tables
//! - [`registry`]: static EXIF/TIFF and GPS tag registries
//! - [`location`]: GPS sub-table to [`Coordinate`] conversion
//!
//! The codec adapter lives in `crate::media::metadata`.

pub mod location;
pub mod registry;
mod tags;
mod types;

pub use location::{resolve_location, PresencePolicy};
pub use tags::{Rational, TagKey, TagTable, TagValue};
pub(crate) use tags::RawTagTable;
pub use types::{format_degrees, Coordinate, MAP_URL_BASE};
