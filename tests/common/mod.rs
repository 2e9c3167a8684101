// SPDX-License-Identifier: MPL-2.0
//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image_rs::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

pub fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

pub fn dms(degrees: u32, minutes: u32, seconds: u32) -> Value {
    Value::Rational(vec![
        exif::Rational {
            num: degrees,
            denom: 1,
        },
        exif::Rational {
            num: minutes,
            denom: 1,
        },
        exif::Rational {
            num: seconds,
            denom: 1,
        },
    ])
}

/// Canon EOS R5 shot at 37°46'30"N 122°25'6"W.
pub fn canon_fields() -> Vec<Field> {
    vec![
        field(Tag::Make, ascii("Canon")),
        field(Tag::Model, ascii("Canon EOS R5")),
        field(Tag::DateTime, ascii("2023:07:15 08:00:00")),
        field(Tag::DateTimeOriginal, ascii("2023:07:14 10:30:00")),
        field(
            Tag::FNumber,
            Value::Rational(vec![exif::Rational { num: 28, denom: 10 }]),
        ),
        field(
            Tag::ExposureTime,
            Value::Rational(vec![exif::Rational { num: 1, denom: 250 }]),
        ),
        field(Tag::PhotographicSensitivity, Value::Short(vec![400])),
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLatitude, dms(37, 46, 30)),
        field(Tag::GPSLongitudeRef, ascii("W")),
        field(Tag::GPSLongitude, dms(122, 25, 6)),
    ]
}

/// Encodes `fields` as a little-endian TIFF structure.
pub fn tiff_block(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).expect("encode EXIF");
    buf.into_inner()
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(16, 12, image_rs::Rgb([200, 120, 40]))
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode image");
    bytes
}

/// A small JPEG with `fields` in an APP1 segment right after SOI.
pub fn jpeg_with_exif(fields: &[Field]) -> Vec<u8> {
    let jpeg = encode(ImageFormat::Jpeg);
    let tiff = tiff_block(fields);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let length = u16::try_from(payload.len() + 2).expect("APP1 fits in a segment");

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for byte in bytes {
        crc ^= u32::from(*byte);
        for _ in 0..8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

/// A small PNG with `fields` in an `eXIf` chunk right after IHDR.
pub fn png_with_exif(fields: &[Field]) -> Vec<u8> {
    let png = encode(ImageFormat::Png);
    let tiff = tiff_block(fields);
    // Signature (8) plus the IHDR chunk (4 + 4 + 13 + 4).
    let after_ihdr = 33;

    let mut chunk = b"eXIf".to_vec();
    chunk.extend_from_slice(&tiff);
    let length = u32::try_from(tiff.len()).expect("chunk length");

    let mut out = Vec::with_capacity(png.len() + chunk.len() + 8);
    out.extend_from_slice(&png[..after_ihdr]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&crc32(&chunk).to_be_bytes());
    out.extend_from_slice(&png[after_ihdr..]);
    out
}

fn iso_box(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let size = u32::try_from(body.len() + 8).expect("box size");
    let mut out = size.to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
    out
}

/// Box body starting with a version byte and zero flags.
fn full_box_body(version: u8, rest: &[u8]) -> Vec<u8> {
    let mut body = vec![version, 0, 0, 0];
    body.extend_from_slice(rest);
    body
}

/// A HEIF container (no image data) whose metadata box holds one `Exif`
/// item stored inline in `idat`. `None` leaves the item out.
pub fn heif(fields: Option<&[Field]>) -> Vec<u8> {
    isobmff_image(b"heic", fields)
}

/// Same layout as [`heif`] under the AVIF brand.
pub fn avif(fields: &[Field]) -> Vec<u8> {
    isobmff_image(b"avif", Some(fields))
}

fn isobmff_image(brand: &[u8; 4], fields: Option<&[Field]>) -> Vec<u8> {
    let mut ftyp = brand.to_vec();
    ftyp.extend_from_slice(&0u32.to_be_bytes());
    ftyp.extend_from_slice(b"mif1");
    ftyp.extend_from_slice(brand);

    let mut hdlr = 0u32.to_be_bytes().to_vec();
    hdlr.extend_from_slice(b"pict");
    hdlr.extend_from_slice(&[0; 13]);
    let mut meta = iso_box(b"hdlr", &full_box_body(0, &hdlr));

    if let Some(fields) = fields {
        let mut infe = 1u16.to_be_bytes().to_vec();
        infe.extend_from_slice(&0u16.to_be_bytes());
        infe.extend_from_slice(b"Exif\0");
        let mut iinf = 1u16.to_be_bytes().to_vec();
        iinf.extend_from_slice(&iso_box(b"infe", &full_box_body(2, &infe)));
        meta.extend_from_slice(&iso_box(b"iinf", &full_box_body(0, &iinf)));

        // Exif item payload: offset to the TIFF header, then the header.
        let mut idat = 0u32.to_be_bytes().to_vec();
        idat.extend_from_slice(&tiff_block(fields));
        let extent_length = u32::try_from(idat.len()).expect("extent length");

        let mut iloc = vec![0x44, 0x00];
        iloc.extend_from_slice(&1u16.to_be_bytes()); // item count
        iloc.extend_from_slice(&1u16.to_be_bytes()); // item ID
        iloc.extend_from_slice(&[0x00, 0x01]); // construction method: idat
        iloc.extend_from_slice(&0u16.to_be_bytes()); // data reference
        iloc.extend_from_slice(&1u16.to_be_bytes()); // extent count
        iloc.extend_from_slice(&0u32.to_be_bytes());
        iloc.extend_from_slice(&extent_length.to_be_bytes());
        meta.extend_from_slice(&iso_box(b"iloc", &full_box_body(1, &iloc)));
        meta.extend_from_slice(&iso_box(b"idat", &idat));
    } else {
        meta.extend_from_slice(&iso_box(
            b"iinf",
            &full_box_body(0, &0u16.to_be_bytes()),
        ));
    }

    let mut out = iso_box(b"ftyp", &ftyp);
    out.extend_from_slice(&iso_box(b"meta", &full_box_body(0, &meta)));
    out
}

pub fn plain_jpeg() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

pub fn plain_png() -> Vec<u8> {
    encode(ImageFormat::Png)
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}
