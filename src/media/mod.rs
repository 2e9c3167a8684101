// SPDX-License-Identifier: MPL-2.0
//! Image file access.
//!
//! Adapters that open image files and turn their contents into domain
//! values. The EXIF reader implements
//! [`MetadataReader`](crate::application::port::MetadataReader).

pub mod metadata;

pub use metadata::{read_image_metadata, ExifMetadataReader};
