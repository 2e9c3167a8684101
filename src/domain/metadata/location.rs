// SPDX-License-Identifier: MPL-2.0
//! GPS sub-table to decimal-degree coordinate conversion.
//!
//! Latitude and longitude are stored as three rationals (degrees, minutes,
//! seconds) plus a hemisphere reference. Anything missing or malformed
//! yields `None`; nothing here panics.

use super::tags::{TagTable, TagValue};
use super::types::Coordinate;

/// How a zero-valued latitude or longitude is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresencePolicy {
    /// A component whose magnitude is exactly 0 counts as missing.
    ///
    /// Matches the historical output of the tool. Points on the equator
    /// or the prime meridian are reported as having no location.
    #[default]
    Truthy,
    /// Any present, well-formed component counts, including 0.
    Explicit,
}

/// One of the two coordinate axes and its GPS tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    #[must_use]
    pub const fn value_tag(self) -> &'static str {
        match self {
            Axis::Latitude => "Latitude",
            Axis::Longitude => "Longitude",
        }
    }

    #[must_use]
    pub const fn ref_tag(self) -> &'static str {
        match self {
            Axis::Latitude => "LatitudeRef",
            Axis::Longitude => "LongitudeRef",
        }
    }

    /// Reference assumed when the tag is absent.
    #[must_use]
    pub const fn default_ref(self) -> &'static str {
        match self {
            Axis::Latitude => "N",
            Axis::Longitude => "E",
        }
    }

    /// Reference that makes the value negative.
    #[must_use]
    pub const fn negative_ref(self) -> &'static str {
        match self {
            Axis::Latitude => "S",
            Axis::Longitude => "W",
        }
    }
}

/// Sexagesimal to decimal degrees: `D + M/60 + S/3600`.
#[must_use]
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Signs a magnitude by hemisphere reference. `None` means the axis default.
#[must_use]
pub fn apply_reference(magnitude: f64, axis: Axis, reference: Option<&str>) -> f64 {
    let reference = reference.unwrap_or(axis.default_ref());
    if reference.eq_ignore_ascii_case(axis.negative_ref()) {
        -magnitude
    } else {
        magnitude
    }
}

/// Converts a D/M/S tag value to decimal degrees.
///
/// Requires at least three rational components that convert to finite
/// numbers.
#[must_use]
pub fn degrees_from_value(value: &TagValue) -> Option<f64> {
    let parts = value.as_rationals()?;
    if parts.len() < 3 {
        return None;
    }
    let degrees = dms_to_degrees(parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64());
    degrees.is_finite().then_some(degrees)
}

fn reference(gps: &TagTable, axis: Axis) -> Option<&str> {
    gps.get(axis.ref_tag())
        .and_then(TagValue::as_text)
        .map(|text| text.trim_matches(|c: char| c == '\0' || c.is_whitespace()))
        .filter(|text| !text.is_empty())
}

/// Resolves one axis of the GPS sub-table to signed decimal degrees.
#[must_use]
pub fn resolve_axis(gps: &TagTable, axis: Axis, policy: PresencePolicy) -> Option<f64> {
    let magnitude = degrees_from_value(gps.get(axis.value_tag())?)?;
    if policy == PresencePolicy::Truthy && magnitude == 0.0 {
        return None;
    }
    Some(apply_reference(magnitude, axis, reference(gps, axis)))
}

/// Resolves the GPS sub-table to a coordinate.
///
/// Returns `None` when the table is absent, or when latitude or longitude is
/// missing, malformed, or (under [`PresencePolicy::Truthy`]) zero.
#[must_use]
pub fn resolve_location(gps: Option<&TagTable>, policy: PresencePolicy) -> Option<Coordinate> {
    let gps = gps?;
    let latitude = resolve_axis(gps, Axis::Latitude, policy)?;
    let longitude = resolve_axis(gps, Axis::Longitude, policy)?;
    let coordinate = Coordinate::new(latitude, longitude);
    coordinate.is_valid().then_some(coordinate)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::tags::{Rational, TagKey};
    use crate::test_utils::{assert_abs_diff_eq, dms, F64_EPSILON};

    fn gps_table(entries: &[(&'static str, TagValue)]) -> TagTable {
        let mut table = TagTable::new();
        for (name, value) in entries {
            table.insert(TagKey::Name(*name), value.clone());
        }
        table
    }

    fn text(value: &str) -> TagValue {
        TagValue::Text(value.to_string())
    }

    #[test]
    fn dms_conversion_matches_formula() {
        let samples = [
            (0.0, 0.0, 0.0),
            (37.0, 46.0, 30.0),
            (122.0, 25.0, 6.0),
            (89.0, 59.0, 59.999),
            (12.0, 0.5, 0.25),
        ];
        for (d, m, s) in samples {
            assert_abs_diff_eq!(
                dms_to_degrees(d, m, s),
                d + m / 60.0 + s / 3600.0,
                epsilon = F64_EPSILON
            );
        }
        assert_abs_diff_eq!(dms_to_degrees(37.0, 46.0, 30.0), 37.775, epsilon = 1e-9);
    }

    #[test]
    fn south_and_west_negate() {
        let magnitude = dms_to_degrees(33.0, 52.0, 7.68);
        assert_eq!(
            apply_reference(magnitude, Axis::Latitude, Some("S")),
            -apply_reference(magnitude, Axis::Latitude, Some("N"))
        );
        assert_eq!(
            apply_reference(magnitude, Axis::Longitude, Some("W")),
            -apply_reference(magnitude, Axis::Longitude, Some("E"))
        );
    }

    #[test]
    fn missing_reference_defaults_to_positive() {
        let gps = gps_table(&[
            ("Latitude", dms(37, 46, 30)),
            ("Longitude", dms(122, 25, 6)),
        ]);
        let coords = resolve_location(Some(&gps), PresencePolicy::Truthy).expect("location");
        assert!(coords.latitude() > 0.0);
        assert!(coords.longitude() > 0.0);
    }

    #[test]
    fn missing_sub_table_resolves_to_none() {
        assert!(resolve_location(None, PresencePolicy::Truthy).is_none());
        assert!(resolve_location(None, PresencePolicy::Explicit).is_none());
    }

    #[test]
    fn missing_latitude_resolves_to_none() {
        let gps = gps_table(&[
            ("Longitude", dms(122, 25, 6)),
            ("LongitudeRef", text("W")),
        ]);
        assert!(resolve_location(Some(&gps), PresencePolicy::Truthy).is_none());
    }

    #[test]
    fn san_francisco_resolves() {
        let gps = gps_table(&[
            ("Latitude", dms(37, 46, 30)),
            ("LatitudeRef", text("N")),
            ("Longitude", dms(122, 25, 6)),
            ("LongitudeRef", text("W")),
        ]);
        let coords = resolve_location(Some(&gps), PresencePolicy::Truthy).expect("location");
        assert_abs_diff_eq!(coords.latitude(), 37.775, epsilon = 1e-9);
        assert_abs_diff_eq!(coords.longitude(), -122.418_333_333, epsilon = 1e-6);
    }

    #[test]
    fn references_tolerate_padding_and_case() {
        let gps = gps_table(&[
            ("Latitude", dms(10, 0, 0)),
            ("LatitudeRef", text(" s\0")),
            ("Longitude", dms(20, 0, 0)),
            ("LongitudeRef", text("w")),
        ]);
        let coords = resolve_location(Some(&gps), PresencePolicy::Truthy).expect("location");
        assert!(coords.latitude() < 0.0);
        assert!(coords.longitude() < 0.0);
    }

    #[test]
    fn zero_component_is_missing_under_truthy_policy() {
        let gps = gps_table(&[
            ("Latitude", dms(0, 0, 0)),
            ("LatitudeRef", text("N")),
            ("Longitude", dms(32, 30, 0)),
            ("LongitudeRef", text("E")),
        ]);
        assert!(resolve_location(Some(&gps), PresencePolicy::Truthy).is_none());

        let coords = resolve_location(Some(&gps), PresencePolicy::Explicit).expect("location");
        assert_eq!(coords.latitude(), 0.0);
        assert_abs_diff_eq!(coords.longitude(), 32.5, epsilon = F64_EPSILON);
    }

    #[test]
    fn malformed_values_resolve_to_none() {
        let short = gps_table(&[
            ("Latitude", TagValue::Rationals(vec![Rational::new(37, 1)])),
            ("Longitude", dms(122, 25, 6)),
        ]);
        assert!(resolve_location(Some(&short), PresencePolicy::Explicit).is_none());

        let zero_denominator = gps_table(&[
            (
                "Latitude",
                TagValue::Rationals(vec![
                    Rational::new(37, 0),
                    Rational::new(0, 1),
                    Rational::new(0, 1),
                ]),
            ),
            ("Longitude", dms(122, 25, 6)),
        ]);
        assert!(resolve_location(Some(&zero_denominator), PresencePolicy::Explicit).is_none());

        let wrong_type = gps_table(&[
            ("Latitude", text("37.775")),
            ("Longitude", dms(122, 25, 6)),
        ]);
        assert!(resolve_location(Some(&wrong_type), PresencePolicy::Explicit).is_none());
    }
}
