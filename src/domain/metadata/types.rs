// SPDX-License-Identifier: MPL-2.0
//! Location value type.
//!
//! Pure domain type with no external dependencies.

use std::fmt;

/// Base of the map link built for a coordinate.
pub const MAP_URL_BASE: &str = "https://www.google.com/maps?q=";

/// Decimal places kept when printing degrees (about 0.1 m at the equator).
pub const DEGREE_DECIMALS: usize = 6;

// =============================================================================
// Coordinate
// =============================================================================

/// A latitude/longitude pair in signed decimal degrees (WGS84).
///
/// # Example
///
/// ```
/// use exif_lens::domain::metadata::Coordinate;
///
/// let coords = Coordinate::new(37.775, -122.418333);
/// assert_eq!(coords.map_url(), "https://www.google.com/maps?q=37.775,-122.418333");
/// assert_eq!(coords.format(), "37.775000° N, 122.418333° W");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees (-90.0 to 90.0)
    latitude: f64,
    /// Longitude in decimal degrees (-180.0 to 180.0)
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, clamping values to the valid ranges:
    /// - Latitude: -90.0 to 90.0
    /// - Longitude: -180.0 to 180.0
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether both components are finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Formats with hemisphere letters: "48.856600° N, 2.352200° E".
    #[must_use]
    pub fn format(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        format!(
            "{:.prec$}° {}, {:.prec$}° {}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir,
            prec = DEGREE_DECIMALS
        )
    }

    /// Google Maps link for this location.
    #[must_use]
    pub fn map_url(&self) -> String {
        format!(
            "{MAP_URL_BASE}{},{}",
            format_degrees(self.latitude),
            format_degrees(self.longitude)
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            format_degrees(self.latitude),
            format_degrees(self.longitude)
        )
    }
}

/// Prints decimal degrees rounded to [`DEGREE_DECIMALS`] places, without
/// trailing zeros: `37.775`, `-122.418333`.
#[must_use]
pub fn format_degrees(value: f64) -> String {
    let fixed = format!("{value:.prec$}", prec = DEGREE_DECIMALS);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
