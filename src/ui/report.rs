// SPDX-License-Identifier: MPL-2.0
//! Report building and rendering.
//!
//! A [`Report`] is the presentation-ready outcome of inspecting one file:
//! file facts, the camera summary, the resolved location and every tag.
//! It renders as coloured text or as pretty-printed JSON.

use crate::application::port::metadata::{ImageInfo, ImageMetadata, ReadError};
use crate::domain::metadata::{
    format_degrees, resolve_location, Coordinate, PresencePolicy, TagTable, TagValue,
};
use crate::error::Result;
use chrono::NaiveDateTime;
use console::Style;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Write};
use std::path::Path;

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SECTION_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const NO_LOCATION_MESSAGE: &str = "Location: not found in EXIF data.";

// =============================================================================
// Output Format
// =============================================================================

/// How a report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// =============================================================================
// Report Model
// =============================================================================

/// Outcome category of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    NoExif,
    Error,
}

/// Facts about the inspected file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub name: String,
    pub format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size_bytes: Option<u64>,
}

impl FileSummary {
    fn new(path: &Path, info: Option<&ImageInfo>) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            path: path.display().to_string(),
            name,
            format: info.map(|i| i.format.clone()),
            width: info.map(|i| i.width).filter(|w| *w > 0),
            height: info.map(|i| i.height).filter(|h| *h > 0),
            size_bytes: info.map(|i| i.file_size),
        }
    }
}

/// An EXIF timestamp, parsed when it follows the `YYYY:MM:DD HH:MM:SS` layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifTimestamp {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl ExifTimestamp {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_string(),
            parsed: NaiveDateTime::parse_from_str(raw, EXIF_DATETIME_FORMAT).ok(),
        }
    }

    #[must_use]
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.parsed
    }
}

impl fmt::Display for ExifTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parsed {
            Some(dt) => write!(f, "{}", dt.format(DISPLAY_DATETIME_FORMAT)),
            None => f.write_str(&self.raw),
        }
    }
}

impl Serialize for ExifTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.parsed {
            Some(dt) => serializer.collect_str(&dt.format(ISO_DATETIME_FORMAT)),
            None => serializer.serialize_str(&self.raw),
        }
    }
}

/// Camera and capture settings, formatted for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CameraSummary {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub lens_model: Option<String>,
    pub aperture: Option<String>,
    pub focal_length: Option<String>,
    pub exposure_time: Option<String>,
    pub iso: Option<String>,
    pub flash: Option<String>,
    pub date_taken: Option<ExifTimestamp>,
    pub date_modified: Option<ExifTimestamp>,
    pub software: Option<String>,
}

impl CameraSummary {
    #[must_use]
    pub fn from_tags(tags: &TagTable) -> Self {
        let text = |name: &str| tags.text(name).map(str::to_string);
        let date_taken = ["DateTimeOriginal", "DateTimeDigitized", "DateTime"]
            .iter()
            .find_map(|name| tags.text(name))
            .map(ExifTimestamp::parse);

        Self {
            brand: text("Make"),
            model: text("Model"),
            lens_model: text("LensModel"),
            aperture: tags.get("FNumber").and_then(format_aperture),
            focal_length: tags
                .get("FocalLength")
                .and_then(|v| format_focal_length(v, tags.get("FocalLengthIn35mmFilm"))),
            exposure_time: tags.get("ExposureTime").and_then(format_exposure_time),
            iso: tags.get("ISOSpeedRatings").and_then(format_iso),
            flash: tags
                .get("Flash")
                .and_then(TagValue::first_integer)
                .map(describe_flash),
            date_taken,
            date_modified: tags.text("DateTime").map(ExifTimestamp::parse),
            software: text("Software"),
        }
    }

    /// Label/value pairs in display order, skipping absent fields.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let strings = [
            ("Camera Brand", self.brand.as_ref()),
            ("Camera Model", self.model.as_ref()),
            ("Lens Model", self.lens_model.as_ref()),
            ("Aperture", self.aperture.as_ref()),
            ("Focal Length", self.focal_length.as_ref()),
            ("Exposure Time", self.exposure_time.as_ref()),
            ("ISO", self.iso.as_ref()),
            ("Flash", self.flash.as_ref()),
        ];
        let mut rows: Vec<(&'static str, String)> = strings
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| (label, v.clone())))
            .collect();
        if let Some(date) = &self.date_taken {
            rows.push(("Date Taken", date.to_string()));
        }
        if let Some(date) = &self.date_modified {
            rows.push(("Date Modified", date.to_string()));
        }
        if let Some(software) = &self.software {
            rows.push(("Software", software.clone()));
        }
        rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Resolved location with its map link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary {
    pub latitude: f64,
    pub longitude: f64,
    pub map_url: String,
}

impl From<Coordinate> for LocationSummary {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            map_url: coordinate.map_url(),
        }
    }
}

/// Everything printed for one inspected file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub file: FileSummary,
    pub status: Status,
    /// Machine-readable reason for a non-`ok` status.
    pub error_kind: Option<&'static str>,
    pub message: Option<String>,
    pub camera: CameraSummary,
    pub location: Option<LocationSummary>,
    #[serde(serialize_with = "serialize_tags")]
    pub tags: TagTable,
}

impl Report {
    /// Returns `true` when the read failed (not for missing EXIF).
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status == Status::Error
    }
}

/// Builds the report for one read outcome.
#[must_use]
pub fn build_report(
    path: &Path,
    outcome: &std::result::Result<ImageMetadata, ReadError>,
    policy: PresencePolicy,
) -> Report {
    match outcome {
        Ok(metadata) => Report {
            file: FileSummary::new(path, Some(&metadata.info)),
            status: Status::Ok,
            error_kind: None,
            message: None,
            camera: CameraSummary::from_tags(&metadata.tags),
            location: resolve_location(metadata.gps_info(), policy).map(LocationSummary::from),
            tags: metadata.tags.clone(),
        },
        Err(err) => Report {
            file: FileSummary::new(path, err.image_info()),
            status: if err.is_informational() {
                Status::NoExif
            } else {
                Status::Error
            },
            error_kind: Some(err.kind()),
            message: Some(err.to_string()),
            camera: CameraSummary::default(),
            location: None,
            tags: TagTable::new(),
        },
    }
}

// =============================================================================
// Field Formatting
// =============================================================================

fn trim_decimals(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// `FNumber` as an f-stop: "f/2.8".
#[must_use]
pub fn format_aperture(value: &TagValue) -> Option<String> {
    let f_number = value.first_f64().filter(|v| v.is_finite() && *v > 0.0)?;
    Some(format!("f/{}", trim_decimals(f_number, 1)))
}

/// Focal length in millimetres, with the 35 mm equivalent when known.
#[must_use]
pub fn format_focal_length(value: &TagValue, equivalent_35mm: Option<&TagValue>) -> Option<String> {
    let mm = value.first_f64().filter(|v| v.is_finite() && *v > 0.0)?;
    let base = format!("{} mm", trim_decimals(mm, 1));
    match equivalent_35mm.and_then(TagValue::first_f64) {
        Some(eq) if eq > 0.0 && (eq - mm).abs() >= 0.5 => {
            Some(format!("{base} ({} mm in 35mm)", trim_decimals(eq, 0)))
        }
        _ => Some(base),
    }
}

/// Exposure time in seconds: "1/250 s" below a second, "2 s" above.
#[must_use]
pub fn format_exposure_time(value: &TagValue) -> Option<String> {
    let seconds = value.first_f64().filter(|v| v.is_finite() && *v > 0.0)?;
    if seconds >= 1.0 {
        Some(format!("{} s", trim_decimals(seconds, 1)))
    } else {
        Some(format!("1/{} s", (1.0 / seconds).round()))
    }
}

#[must_use]
pub fn format_iso(value: &TagValue) -> Option<String> {
    value
        .first_f64()
        .filter(|v| *v > 0.0)
        .map(|v| trim_decimals(v, 0))
}

/// Decodes the EXIF `Flash` bit field.
#[must_use]
pub fn describe_flash(flags: i64) -> String {
    if flags & 0x20 != 0 {
        return "No flash function".to_string();
    }
    let mut description = if flags & 0x01 != 0 {
        "Fired".to_string()
    } else {
        "Did not fire".to_string()
    };
    match (flags >> 3) & 0x03 {
        1 => description.push_str(", compulsory"),
        2 => description.push_str(", suppressed"),
        3 => description.push_str(", auto mode"),
        _ => {}
    }
    if flags & 0x40 != 0 {
        description.push_str(", red-eye reduction");
    }
    description
}

/// Human-readable file size.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

// =============================================================================
// JSON
// =============================================================================

struct TagTableJson<'a>(&'a TagTable);

impl Serialize for TagTableJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(key, value)| (key.to_string(), TagValueJson(value))),
        )
    }
}

struct TagValueJson<'a>(&'a TagValue);

impl Serialize for TagValueJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            TagValue::Table(table) => TagTableJson(table).serialize(serializer),
            other => serializer.collect_str(other),
        }
    }
}

fn serialize_tags<S: Serializer>(
    tags: &TagTable,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    TagTableJson(tags).serialize(serializer)
}

/// Pretty-printed JSON object for the report.
///
/// # Errors
///
/// Returns [`Error::Output`](crate::error::Error::Output) if serialization
/// fails.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

// =============================================================================
// Text
// =============================================================================

/// Text rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOptions {
    /// Emit ANSI colours.
    pub color: bool,
    /// Append every resolved tag.
    pub show_all: bool,
}

struct Palette {
    heading: Style,
    field: Style,
    location: Style,
    link: Style,
    warning: Style,
    error: Style,
    dim: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        let style = |s: Style| s.force_styling(color);
        Self {
            heading: style(Style::new().cyan().bold()),
            field: style(Style::new().green()),
            location: style(Style::new().yellow()),
            link: style(Style::new().blue().underlined()),
            warning: style(Style::new().yellow()),
            error: style(Style::new().red()),
            dim: style(Style::new().dim()),
        }
    }
}

fn row<W: Write>(out: &mut W, style: &Style, label: &str, value: &str) -> fmt::Result {
    writeln!(out, "{}", style.apply_to(format!("{label:<14}: {value}")))
}

fn heading<W: Write>(out: &mut W, style: &Style, title: &str) -> fmt::Result {
    writeln!(out, "{}\n", style.apply_to(format!("━━━━━━━━━━ {title} ━━━━━━━━━━")))
}

fn write_file_section<W: Write>(
    out: &mut W,
    palette: &Palette,
    file: &FileSummary,
) -> fmt::Result {
    row(out, &palette.field, "File", &file.name)?;
    if let Some(format) = &file.format {
        row(out, &palette.field, "Format", format)?;
    }
    if let (Some(width), Some(height)) = (file.width, file.height) {
        row(out, &palette.field, "Dimensions", &format!("{width} x {height}"))?;
    }
    if let Some(size) = file.size_bytes {
        row(out, &palette.field, "File Size", &format_file_size(size))?;
    }
    Ok(())
}

fn write_location<W: Write>(
    out: &mut W,
    palette: &Palette,
    location: Option<&LocationSummary>,
) -> fmt::Result {
    let Some(location) = location else {
        return writeln!(out, "\n{}", palette.error.apply_to(NO_LOCATION_MESSAGE));
    };
    writeln!(out, "\n{}", palette.location.apply_to("Location Found"))?;
    row(out, &palette.location, "Latitude", &format_degrees(location.latitude))?;
    row(out, &palette.location, "Longitude", &format_degrees(location.longitude))?;
    writeln!(out, "\n{}", palette.link.apply_to("Google Maps:"))?;
    writeln!(out, "{}", palette.link.apply_to(&location.map_url))
}

fn write_tags<W: Write>(
    out: &mut W,
    palette: &Palette,
    tags: &TagTable,
    indent: usize,
) -> fmt::Result {
    for (key, value) in tags.iter() {
        match value {
            TagValue::Table(table) => {
                writeln!(out, "{:indent$}{}:", "", palette.field.apply_to(key))?;
                write_tags(out, palette, table, indent + 2)?;
            }
            other => writeln!(
                out,
                "{:indent$}{}: {}",
                "",
                palette.field.apply_to(key),
                palette.dim.apply_to(other)
            )?,
        }
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &Report, options: TextOptions) -> fmt::Result {
    let palette = Palette::new(options.color);

    writeln!(out)?;
    heading(out, &palette.heading, "IMAGE DETAILS")?;
    write_file_section(out, &palette, &report.file)?;

    match report.status {
        Status::Ok => {
            writeln!(out)?;
            for (label, value) in report.camera.rows() {
                row(out, &palette.field, label, &value)?;
            }
        }
        Status::NoExif => {
            let message = report.message.as_deref().unwrap_or("No EXIF data found");
            writeln!(out, "\n{}", palette.warning.apply_to(format!("{message}.")))?;
        }
        Status::Error => {
            let message = report.message.as_deref().unwrap_or("Unknown error");
            writeln!(out, "\n{}", palette.error.apply_to(format!("Error: {message}")))?;
        }
    }

    write_location(out, &palette, report.location.as_ref())?;

    if options.show_all && !report.tags.is_empty() {
        writeln!(out)?;
        heading(out, &palette.heading, "ALL TAGS")?;
        write_tags(out, &palette, &report.tags, 0)?;
    }

    writeln!(out, "\n{}", palette.heading.apply_to(SECTION_RULE))
}

/// A report paired with its text options, printable with `{}`.
pub struct TextReport<'a> {
    report: &'a Report,
    options: TextOptions,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self.report, self.options)
    }
}

/// Text view of `report`.
#[must_use]
pub fn text_report(report: &Report, options: TextOptions) -> TextReport<'_> {
    TextReport { report, options }
}

/// Renders the report as a plain-text block.
#[must_use]
pub fn render_text(report: &Report, options: TextOptions) -> String {
    text_report(report, options).to_string()
}
