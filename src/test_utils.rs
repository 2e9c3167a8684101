// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and tag fixtures.
//!
//! Re-exports the `approx` crate's assertion macros for float comparison,
//! which handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::domain::metadata::{Rational, TagValue};

/// Default epsilon for f64 comparisons.
/// Suitable for values that should be "exactly equal" but may have minor floating-point errors.
pub const F64_EPSILON: f64 = 1e-10;

/// Degrees/minutes/seconds as whole-number rationals.
pub fn dms(degrees: i64, minutes: i64, seconds: i64) -> TagValue {
    TagValue::Rationals(vec![
        Rational::new(degrees, 1),
        Rational::new(minutes, 1),
        Rational::new(seconds, 1),
    ])
}

/// Builds a primary-image EXIF field.
pub fn field(tag: exif::Tag, value: exif::Value) -> exif::Field {
    exif::Field {
        tag,
        ifd_num: exif::In::PRIMARY,
        value,
    }
}

/// EXIF ASCII value from a string.
pub fn ascii(text: &str) -> exif::Value {
    exif::Value::Ascii(vec![text.as_bytes().to_vec()])
}

/// EXIF rational triple for a D/M/S coordinate.
pub fn rational_dms(degrees: u32, minutes: u32, seconds: u32) -> exif::Value {
    exif::Value::Rational(vec![
        exif::Rational { num: degrees, denom: 1 },
        exif::Rational { num: minutes, denom: 1 },
        exif::Rational { num: seconds, denom: 1 },
    ])
}
