// SPDX-License-Identifier: MPL-2.0
//! `exif_lens` reads EXIF metadata from a photo and reports camera settings,
//! timestamps and the GPS location, with a map link when one is recorded.
//!
//! The crate is layered: [`domain`] holds the tag model and the coordinate
//! math, [`application`] defines the reader port, [`media`] implements it
//! with `kamadak-exif`, and [`ui`] renders reports and runs the interactive
//! shell.

#![doc(html_root_url = "https://docs.rs/exif_lens/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
