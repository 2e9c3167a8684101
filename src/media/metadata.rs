// SPDX-License-Identifier: MPL-2.0
//! EXIF metadata extraction for still images.
//!
//! Probes the container with `image` (format and dimensions), then parses
//! the EXIF block with `kamadak-exif` and resolves it against the tag
//! registry. Containers `image` has no decoder for (HEIF, AVIF without the
//! codec, unusual JPEG codings) go straight to the EXIF parser; their
//! dimensions come from the EXIF pixel-dimension tags when present. One file
//! handle serves both passes and is released when [`read_image_metadata`]
//! returns.

use crate::application::port::metadata::{ImageInfo, ImageMetadata, MetadataReader, ReadError};
use crate::domain::metadata::registry::{self, GPS_INFO};
use crate::domain::metadata::{RawTagTable, Rational, TagValue};
use exif::{Context, Exif, In, Tag};
use image_rs::{ImageError, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;
use tracing::debug;

/// [`MetadataReader`] backed by `image` and `kamadak-exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifMetadataReader;

impl MetadataReader for ExifMetadataReader {
    fn read(&self, path: &Path) -> Result<ImageMetadata, ReadError> {
        read_image_metadata(path)
    }
}

/// Extract image facts and resolved EXIF tags from an image file.
///
/// # Errors
///
/// - [`ReadError::FileNotReadable`] if the file cannot be opened or read
/// - [`ReadError::UnsupportedFormat`] if neither `image` nor the EXIF parser
///   recognises the container
/// - [`ReadError::DecodeFailure`] if the header or the EXIF block is corrupt
/// - [`ReadError::NoExifPresent`] if the image carries no EXIF tags
pub fn read_image_metadata<P: AsRef<Path>>(path: P) -> Result<ImageMetadata, ReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| unreadable(path, e))?;
    let file_size = file.metadata().map_err(|e| unreadable(path, e))?.len();
    let mut reader = BufReader::new(file);

    let (exif, mut info, probed) = match probe_image(&mut reader, file_size) {
        Ok((format, info)) => {
            debug!(
                path = %path.display(),
                format = %info.format,
                width = info.width,
                height = info.height,
                "probed image"
            );
            if !carries_exif(format) {
                debug!(format = %info.format, "format has no EXIF container support");
                return Err(ReadError::NoExifPresent(info));
            }
            reader.rewind().map_err(|e| unreadable(path, e))?;
            (parse_exif(&mut reader, path, &info)?, info, true)
        }
        Err(ReadError::UnsupportedFormat) => {
            reader.rewind().map_err(|e| unreadable(path, e))?;
            let info = ImageInfo {
                format: container_name(reader.fill_buf().map_err(|e| unreadable(path, e))?),
                width: 0,
                height: 0,
                file_size,
            };
            debug!(
                path = %path.display(),
                format = %info.format,
                "no decoder for header, trying EXIF container"
            );
            let exif = match parse_exif(&mut reader, path, &info) {
                Err(ReadError::DecodeFailure(reason)) => {
                    debug!(reason = %reason, "EXIF parser does not recognise the container");
                    return Err(ReadError::UnsupportedFormat);
                }
                other => other?,
            };
            (exif, info, false)
        }
        Err(e) => return Err(e),
    };

    if !probed {
        info.width = primary_uint(&exif, Tag::PixelXDimension).unwrap_or(0);
        info.height = primary_uint(&exif, Tag::PixelYDimension).unwrap_or(0);
    }

    let raw = collect_raw_tags(exif.fields());
    if raw.is_empty() {
        debug!("EXIF block has no primary-image fields");
        return Err(ReadError::NoExifPresent(info));
    }

    let tags = registry::resolve(&raw);
    debug!(tags = tags.len(), "resolved EXIF tags");
    Ok(ImageMetadata { info, tags })
}

fn unreadable(path: &Path, e: std::io::Error) -> ReadError {
    ReadError::FileNotReadable(format!("{}: {e}", path.display()))
}

/// Parses the EXIF block from the start of `reader`.
fn parse_exif<R: BufRead + Seek>(
    reader: &mut R,
    path: &Path,
    info: &ImageInfo,
) -> Result<Exif, ReadError> {
    match exif::Reader::new().read_from_container(reader) {
        Ok(exif) => Ok(exif),
        Err(exif::Error::NotFound(what)) => {
            debug!(what, "no EXIF block");
            Err(ReadError::NoExifPresent(info.clone()))
        }
        Err(exif::Error::Io(e)) => Err(unreadable(path, e)),
        Err(e) => Err(ReadError::DecodeFailure(e.to_string())),
    }
}

fn primary_uint(exif: &Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// Names a container from its leading bytes when `image` could not.
fn container_name(head: &[u8]) -> String {
    let name = match head {
        [0xFF, 0xD8, ..] => "JPEG",
        [0x89, b'P', b'N', b'G', ..] => "PNG",
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => "TIFF",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "WebP",
        [_, _, _, _, b'f', b't', b'y', b'p', b'a', b'v', b'i', b'f' | b's', ..] => "AVIF",
        [_, _, _, _, b'f', b't', b'y', b'p', ..] => "HEIF",
        _ => "Unknown",
    };
    name.to_string()
}

/// Detects the container format and reads the dimensions from the header.
fn probe_image<R: BufRead + Seek>(
    reader: R,
    file_size: u64,
) -> Result<(ImageFormat, ImageInfo), ReadError> {
    let image_reader = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| ReadError::FileNotReadable(e.to_string()))?;
    let format = image_reader.format().ok_or(ReadError::UnsupportedFormat)?;
    let (width, height) = image_reader.into_dimensions().map_err(|e| match e {
        ImageError::Unsupported(_) => ReadError::UnsupportedFormat,
        // A short read here means a truncated header.
        other => ReadError::DecodeFailure(other.to_string()),
    })?;

    Ok((
        format,
        ImageInfo {
            format: format_name(format),
            width,
            height,
            file_size,
        },
    ))
}

/// Containers `kamadak-exif` can read an EXIF block from.
fn carries_exif(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Tiff | ImageFormat::WebP
    )
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::WebP => "WebP".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Ico => "ICO".to_string(),
        other => format!("{other:?}").to_uppercase(),
    }
}

/// IFD pointer tags; their content is flattened into the table.
fn is_ifd_pointer(tag: Tag) -> bool {
    tag == Tag::ExifIFDPointer || tag == Tag::GPSInfoIFDPointer || tag == Tag::InteropIFDPointer
}

/// Builds the raw tag table from primary-image fields.
///
/// TIFF and EXIF fields share the top level; GPS fields are nested under the
/// GPSInfo ID. Interoperability fields and thumbnail IFDs are skipped.
pub(crate) fn collect_raw_tags<'a, I>(fields: I) -> RawTagTable
where
    I: IntoIterator<Item = &'a exif::Field>,
{
    let mut table = RawTagTable::default();
    let mut gps = RawTagTable::default();

    for field in fields {
        if field.ifd_num != In::PRIMARY || is_ifd_pointer(field.tag) {
            continue;
        }
        match field.tag.context() {
            Context::Gps => gps.insert(field.tag.number(), convert_value(&field.value)),
            Context::Tiff | Context::Exif => {
                table.insert(field.tag.number(), convert_value(&field.value));
            }
            _ => {}
        }
    }

    if !gps.is_empty() {
        table.insert_table(GPS_INFO, gps);
    }
    table
}

fn ascii_text(parts: &[Vec<u8>]) -> String {
    parts
        .iter()
        .map(|v| String::from_utf8_lossy(v))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

fn integers<T: Copy + Into<i64>>(values: &[T]) -> TagValue {
    TagValue::Integers(values.iter().map(|v| (*v).into()).collect())
}

/// Converts a codec value into the crate's tag value.
fn convert_value(value: &exif::Value) -> TagValue {
    use exif::Value;

    match value {
        Value::Ascii(parts) => TagValue::Text(ascii_text(parts)),
        Value::Byte(bytes) => TagValue::Bytes(bytes.clone()),
        Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
        Value::SByte(values) => integers(values),
        Value::Short(values) => integers(values),
        Value::SShort(values) => integers(values),
        Value::Long(values) => integers(values),
        Value::SLong(values) => integers(values),
        Value::Rational(values) => TagValue::Rationals(
            values
                .iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::SRational(values) => TagValue::Rationals(
            values
                .iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::Float(values) => TagValue::Floats(values.iter().map(|v| f64::from(*v)).collect()),
        Value::Double(values) => TagValue::Floats(values.clone()),
        Value::Unknown(type_id, count, _) => {
            TagValue::Text(format!("(unknown type {type_id}, {count} values)"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::TagKey;
    use crate::test_utils::{ascii, field, rational_dms};
    use std::io::Cursor;

    fn resolve_fields(fields: &[exif::Field]) -> crate::domain::metadata::TagTable {
        registry::resolve(&collect_raw_tags(fields))
    }

    #[test]
    fn fields_resolve_to_named_tags() {
        let fields = vec![
            field(Tag::Make, ascii("Canon")),
            field(Tag::Model, ascii("EOS R5")),
            field(Tag::PhotographicSensitivity, exif::Value::Short(vec![400])),
        ];
        let tags = resolve_fields(&fields);

        assert_eq!(tags.text("Make"), Some("Canon"));
        assert_eq!(tags.text("Model"), Some("EOS R5"));
        assert_eq!(
            tags.get("ISOSpeedRatings").and_then(TagValue::first_integer),
            Some(400)
        );
    }

    #[test]
    fn gps_fields_nest_under_gps_info() {
        let fields = vec![
            field(Tag::GPSLatitudeRef, ascii("N")),
            field(Tag::GPSLatitude, rational_dms(37, 46, 30)),
            field(Tag::GPSLongitudeRef, ascii("W")),
            field(Tag::GPSLongitude, rational_dms(122, 25, 6)),
            field(Tag::GPSInfoIFDPointer, exif::Value::Long(vec![1234])),
        ];
        let tags = resolve_fields(&fields);

        assert_eq!(tags.len(), 1);
        let gps = tags
            .get("GPSInfo")
            .and_then(TagValue::as_table)
            .expect("GPS sub-table");
        assert_eq!(gps.text("LatitudeRef"), Some("N"));
        assert_eq!(gps.text("LongitudeRef"), Some("W"));
        assert_eq!(
            gps.get("Latitude").and_then(TagValue::as_rationals),
            Some(&[Rational::new(37, 1), Rational::new(46, 1), Rational::new(30, 1)][..])
        );
    }

    #[test]
    fn unknown_tags_keep_numeric_ids() {
        let fields = vec![field(
            Tag(Context::Tiff, 0xBEEF),
            exif::Value::Long(vec![7]),
        )];
        let tags = resolve_fields(&fields);
        assert_eq!(tags.get_id(0xBEEF), Some(&TagValue::Integers(vec![7])));
        assert!(tags.iter().all(|(key, _)| *key == TagKey::Id(0xBEEF)));
    }

    #[test]
    fn thumbnail_and_pointer_fields_are_skipped() {
        let thumbnail = exif::Field {
            tag: Tag::Make,
            ifd_num: In::THUMBNAIL,
            value: ascii("Thumb"),
        };
        let fields = vec![
            thumbnail,
            field(Tag::ExifIFDPointer, exif::Value::Long(vec![100])),
        ];
        assert!(collect_raw_tags(&fields).is_empty());
    }

    #[test]
    fn ascii_values_are_trimmed() {
        assert_eq!(
            convert_value(&exif::Value::Ascii(vec![b"Canon\0\0".to_vec()])),
            TagValue::Text("Canon".to_string())
        );
        assert_eq!(
            convert_value(&exif::Value::Ascii(vec![b" S ".to_vec()])),
            TagValue::Text("S".to_string())
        );
    }

    #[test]
    fn numeric_values_widen() {
        assert_eq!(
            convert_value(&exif::Value::SShort(vec![-3, 4])),
            TagValue::Integers(vec![-3, 4])
        );
        assert_eq!(
            convert_value(&exif::Value::SRational(vec![exif::SRational { num: -1, denom: 3 }])),
            TagValue::Rationals(vec![Rational::new(-1, 3)])
        );
        assert_eq!(
            convert_value(&exif::Value::Float(vec![0.5])),
            TagValue::Floats(vec![0.5])
        );
    }

    #[test]
    fn probe_rejects_unknown_formats() {
        let reader = Cursor::new(b"definitely not an image".to_vec());
        assert_eq!(
            probe_image(reader, 23).unwrap_err(),
            ReadError::UnsupportedFormat
        );
    }

    #[test]
    fn probe_reads_png_dimensions() {
        let mut bytes = Vec::new();
        image_rs::RgbImage::new(3, 2)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        let size = bytes.len() as u64;

        let (format, info) = probe_image(Cursor::new(bytes), size).expect("probe");
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(info.format, "PNG");
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.file_size, size);
    }

    #[test]
    fn probe_reports_truncated_headers_as_decode_failures() {
        // PNG signature followed by garbage instead of an IHDR chunk.
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0xFF; 16]);
        let err = probe_image(Cursor::new(bytes), 24).unwrap_err();
        assert!(
            matches!(err, ReadError::DecodeFailure(_)),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn missing_file_is_not_readable() {
        let err = read_image_metadata("/nonexistent/path/image.jpg").unwrap_err();
        assert!(matches!(err, ReadError::FileNotReadable(msg) if msg.contains("image.jpg")));
    }

    #[test]
    fn containers_are_named_from_leading_bytes() {
        assert_eq!(container_name(b"\0\0\0\x18ftypheic"), "HEIF");
        assert_eq!(container_name(b"\0\0\0\x18ftypavif"), "AVIF");
        assert_eq!(container_name(&[0xFF, 0xD8, 0xFF, 0xC9]), "JPEG");
        assert_eq!(container_name(b"RIFF\0\0\0\0WEBPVP8X"), "WebP");
        assert_eq!(container_name(b"plain"), "Unknown");
        assert_eq!(container_name(b""), "Unknown");
    }

    #[test]
    fn unrecognised_content_stays_unsupported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("notes.heic");
        std::fs::write(&path, b"\0\0\0\x10ftypqt  \0\0\0\0").expect("write");
        assert_eq!(
            read_image_metadata(&path).unwrap_err(),
            ReadError::UnsupportedFormat
        );
    }

    #[test]
    fn format_names_are_uppercase_tokens() {
        assert_eq!(format_name(ImageFormat::Jpeg), "JPEG");
        assert_eq!(format_name(ImageFormat::Gif), "GIF");
        assert!(carries_exif(ImageFormat::Png));
        assert!(!carries_exif(ImageFormat::Gif));
    }
}
