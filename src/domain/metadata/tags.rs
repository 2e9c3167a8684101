// SPDX-License-Identifier: MPL-2.0
//! Tag tables: raw (numeric IDs) and resolved (registry names).
//!
//! Pure value types with no external dependencies. The codec adapter in
//! `crate::media::metadata` fills a [`RawTagTable`]; the registry turns it
//! into a [`TagTable`] that the rest of the crate reads.

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// TagKey
// =============================================================================

/// Key of a resolved tag.
///
/// Tags found in the registry are keyed by name. Tags the registry does not
/// know keep their numeric ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagKey {
    /// Registry name (e.g. `"Make"`, `"Latitude"`).
    Name(&'static str),
    /// Unmapped numeric tag ID.
    Id(u16),
}

impl TagKey {
    /// Returns the registry name, if this key was resolved.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            TagKey::Name(name) => Some(*name),
            TagKey::Id(_) => None,
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKey::Name(name) => f.write_str(name),
            TagKey::Id(id) => write!(f, "{id}"),
        }
    }
}

// =============================================================================
// Rational
// =============================================================================

/// A TIFF rational (signed or unsigned), widened to `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: i64,
    pub denom: i64,
}

impl Rational {
    #[must_use]
    pub const fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }

    /// Converts to `f64`. A zero denominator yields a non-finite value.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.denom)
        }
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// Value of a resolved tag: text, numbers, opaque bytes or a nested table.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Integers(Vec<i64>),
    Rationals(Vec<Rational>),
    Floats(Vec<f64>),
    Bytes(Vec<u8>),
    Table(TagTable),
}

impl TagValue {
    /// Returns the text content of an ASCII tag.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the nested table (e.g. the GPS sub-table).
    #[must_use]
    pub fn as_table(&self) -> Option<&TagTable> {
        match self {
            TagValue::Table(table) => Some(table),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            TagValue::Rationals(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the first component as `f64`, whatever the numeric type.
    #[must_use]
    pub fn first_f64(&self) -> Option<f64> {
        match self {
            TagValue::Integers(values) => values.first().map(|v| *v as f64),
            TagValue::Rationals(values) => values.first().map(|r| r.to_f64()),
            TagValue::Floats(values) => values.first().copied(),
            _ => None,
        }
    }

    /// Returns the first component of an integer tag.
    #[must_use]
    pub fn first_integer(&self) -> Option<i64> {
        match self {
            TagValue::Integers(values) => values.first().copied(),
            _ => None,
        }
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(text) => f.write_str(text),
            TagValue::Integers(values) => join(f, values),
            TagValue::Rationals(values) => join(f, values),
            TagValue::Floats(values) => join(f, values),
            TagValue::Bytes(bytes) => {
                let printable = !bytes.is_empty()
                    && bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ');
                if printable {
                    f.write_str(&String::from_utf8_lossy(bytes))
                } else {
                    write!(f, "({} bytes)", bytes.len())
                }
            }
            TagValue::Table(table) => write!(f, "({} entries)", table.len()),
        }
    }
}

// =============================================================================
// TagTable
// =============================================================================

/// Resolved tag table: registry names (or unmapped IDs) to values.
///
/// Named keys sort before numeric ones; both groups are ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTable {
    entries: BTreeMap<TagKey, TagValue>,
}

impl TagTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: TagKey, value: TagValue) {
        self.entries.insert(key, value);
    }

    /// Looks up a tag by registry name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.name() == Some(name))
            .map(|(_, value)| value)
    }

    /// Looks up an unmapped tag by its numeric ID.
    #[must_use]
    pub fn get_id(&self, id: u16) -> Option<&TagValue> {
        self.entries.get(&TagKey::Id(id))
    }

    /// Returns the trimmed text of a named tag, skipping blank values.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(TagValue::as_text)
            .filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagKey, &TagValue)> {
        self.entries.iter()
    }
}

// =============================================================================
// RawTagTable
// =============================================================================

/// Entry of a [`RawTagTable`]: a plain value or a nested IFD.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue {
    Value(TagValue),
    SubTable(RawTagTable),
}

/// Numeric tag ID to value, as read from the EXIF block.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawTagTable {
    entries: BTreeMap<u16, RawValue>,
}

impl RawTagTable {
    pub(crate) fn insert(&mut self, id: u16, value: TagValue) {
        self.entries.insert(id, RawValue::Value(value));
    }

    pub(crate) fn insert_table(&mut self, id: u16, table: RawTagTable) {
        self.entries.insert(id, RawValue::SubTable(table));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&u16, &RawValue)> {
        self.entries.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
