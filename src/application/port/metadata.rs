// SPDX-License-Identifier: MPL-2.0
//! Metadata reading port definitions.
//!
//! This module defines the trait for reading EXIF metadata from image files
//! and the value objects it returns. The `kamadak-exif` adapter in
//! `crate::media::metadata` implements it; tests substitute their own.

use crate::domain::metadata::{registry, TagTable, TagValue};
use std::fmt;
use std::path::Path;

// =============================================================================
// ImageInfo
// =============================================================================

/// Container facts gathered while probing the image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageInfo {
    /// Detected format (e.g., "JPEG", "PNG").
    pub format: String,

    /// Width in pixels, 0 when unknown.
    pub width: u32,

    /// Height in pixels, 0 when unknown.
    pub height: u32,

    /// File size in bytes.
    pub file_size: u64,
}

// =============================================================================
// ReadError
// =============================================================================

/// Why a read produced no metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The file could not be opened or read.
    FileNotReadable(String),

    /// The file header matches no supported image format.
    UnsupportedFormat,

    /// The image decodes but carries no EXIF block.
    NoExifPresent(ImageInfo),

    /// The image header or its EXIF block is corrupt.
    DecodeFailure(String),
}

impl ReadError {
    /// Returns `true` for conditions that are reported, not failures.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        matches!(self, ReadError::NoExifPresent(_))
    }

    /// Image facts known despite the error.
    #[must_use]
    pub fn image_info(&self) -> Option<&ImageInfo> {
        match self {
            ReadError::NoExifPresent(info) => Some(info),
            _ => None,
        }
    }

    /// Stable identifier used by the structured output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ReadError::FileNotReadable(_) => "file_not_readable",
            ReadError::UnsupportedFormat => "unsupported_format",
            ReadError::NoExifPresent(_) => "no_exif",
            ReadError::DecodeFailure(_) => "decode_failure",
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::FileNotReadable(msg) => write!(f, "Cannot read file: {msg}"),
            ReadError::UnsupportedFormat => write!(f, "Unsupported image format"),
            ReadError::NoExifPresent(_) => write!(f, "No EXIF data found"),
            ReadError::DecodeFailure(msg) => write!(f, "Failed to decode image: {msg}"),
        }
    }
}

impl std::error::Error for ReadError {}

// =============================================================================
// ImageMetadata
// =============================================================================

/// Successful read: image facts plus the resolved tag table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMetadata {
    pub info: ImageInfo,
    pub tags: TagTable,
}

impl ImageMetadata {
    /// The GPS sub-table, if the image has one.
    #[must_use]
    pub fn gps_info(&self) -> Option<&TagTable> {
        self.tags
            .get(registry::GPS_INFO_NAME)
            .and_then(TagValue::as_table)
    }
}

// =============================================================================
// MetadataReader Trait
// =============================================================================

/// Port for reading metadata from image files.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Example
///
/// ```ignore
/// use exif_lens::application::port::metadata::MetadataReader;
/// use std::path::Path;
///
/// fn show_camera(reader: &impl MetadataReader, path: &Path) {
///     if let Ok(meta) = reader.read(path) {
///         if let Some(model) = meta.tags.text("Model") {
///             println!("Camera: {model}");
///         }
///     }
/// }
/// ```
pub trait MetadataReader: Send + Sync {
    /// Reads image facts and EXIF tags from a file.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] describing why no metadata was produced.
    fn read(&self, path: &Path) -> Result<ImageMetadata, ReadError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::TagKey;

    #[test]
    fn read_error_display() {
        let err = ReadError::DecodeFailure("truncated header".to_string());
        assert!(format!("{err}").contains("truncated header"));

        let err = ReadError::FileNotReadable("/tmp/x.jpg: not found".to_string());
        assert!(format!("{err}").contains("/tmp/x.jpg"));

        assert_eq!(
            format!("{}", ReadError::UnsupportedFormat),
            "Unsupported image format"
        );
    }

    #[test]
    fn only_missing_exif_is_informational() {
        assert!(ReadError::NoExifPresent(ImageInfo::default()).is_informational());
        assert!(!ReadError::UnsupportedFormat.is_informational());
        assert!(!ReadError::DecodeFailure(String::new()).is_informational());
        assert!(!ReadError::FileNotReadable(String::new()).is_informational());
    }

    #[test]
    fn read_error_kinds_are_distinct() {
        let kinds = [
            ReadError::FileNotReadable(String::new()).kind(),
            ReadError::UnsupportedFormat.kind(),
            ReadError::NoExifPresent(ImageInfo::default()).kind(),
            ReadError::DecodeFailure(String::new()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn no_exif_keeps_image_info() {
        let info = ImageInfo {
            format: "PNG".to_string(),
            width: 4,
            height: 2,
            file_size: 80,
        };
        let err = ReadError::NoExifPresent(info.clone());
        assert_eq!(err.image_info(), Some(&info));
        assert!(ReadError::UnsupportedFormat.image_info().is_none());
    }

    #[test]
    fn gps_info_returns_nested_table() {
        let mut gps = TagTable::new();
        gps.insert(TagKey::Name("LatitudeRef"), TagValue::Text("N".into()));
        let mut tags = TagTable::new();
        tags.insert(TagKey::Name("GPSInfo"), TagValue::Table(gps.clone()));

        let meta = ImageMetadata {
            info: ImageInfo::default(),
            tags,
        };
        assert_eq!(meta.gps_info(), Some(&gps));
        assert!(ImageMetadata::default().gps_info().is_none());
    }

    // Test that the trait is object-safe
    fn _assert_reader_object_safe(_: &dyn MetadataReader) {}
}
