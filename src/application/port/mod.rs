// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, keeping the shell and report layers
//! independent of the EXIF codec.
//!
//! # Available Ports
//!
//! - [`metadata`]: Metadata reading (EXIF)

pub mod metadata;

// Re-export main types for convenience
pub use metadata::{ImageInfo, ImageMetadata, MetadataReader, ReadError};
