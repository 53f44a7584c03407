//! Structured records exchanged with fontforge
//!
//! All records travel as plain tuples:
//!
//! ```text
//! NameRecord     (locale, key, value)
//! ScriptRecord   (tag, (language tag, ...))
//! FeatureRecord  (tag, (ScriptRecord, ...))
//! ```
//!
//! Tags are OpenType tags: at most four printable ASCII characters, sent
//! space-padded to exactly four.

use crate::errors::BridgeError;
use crate::marshal::{record_items, tuple_of, FromForeign, ToForeign};
use pyo3::prelude::*;
use std::fmt;
use std::str::FromStr;

/// A four-character OpenType tag
///
/// Stored without its padding. Longer or non-ASCII input is rejected instead
/// of being truncated, since a truncated tag would name a different feature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub const WIDTH: usize = 4;

    pub fn new(tag: &str) -> Result<Self, BridgeError> {
        let trimmed = tag.trim_end_matches(' ');
        let printable = trimmed.bytes().all(|b| (0x20..0x7f).contains(&b));
        if !printable || trimmed.len() > Self::WIDTH {
            return Err(BridgeError::InvalidTag(tag.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag padded with trailing spaces to [`Tag::WIDTH`]
    pub fn padded(&self) -> String {
        format!("{:<width$}", self.0, width = Self::WIDTH)
    }
}

impl FromStr for Tag {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::new(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToForeign for Tag {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.padded().to_foreign(py)
    }
}

impl FromForeign for Tag {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        let raw = String::from_foreign(object)?;
        Tag::new(&raw).map_err(|_| BridgeError::mismatch("4-character tag", format!("{:?}", raw)))
    }
}

/// One entry of a font's SFNT name table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub locale: String,
    pub key: String,
    pub value: String,
}

impl NameRecord {
    pub fn new(
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

impl ToForeign for NameRecord {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        (&self.locale, &self.key, &self.value).to_foreign(py)
    }
}

impl FromForeign for NameRecord {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        let items = record_items(object, 3, "name record")?;
        Ok(Self {
            locale: String::from_foreign(&items[0])?,
            key: String::from_foreign(&items[1])?,
            value: String::from_foreign(&items[2])?,
        })
    }
}

/// A script and the languages a feature applies to within it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    pub tag: Tag,
    pub languages: Vec<Tag>,
}

impl ToForeign for ScriptRecord {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        tuple_of(
            py,
            vec![self.tag.to_foreign(py)?, self.languages.to_foreign(py)?],
        )
    }
}

impl FromForeign for ScriptRecord {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        let items = record_items(object, 2, "script record")?;
        Ok(Self {
            tag: Tag::from_foreign(&items[0])?,
            languages: Vec::from_foreign(&items[1])?,
        })
    }
}

/// A feature tag with the scripts it is registered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub tag: Tag,
    pub scripts: Vec<ScriptRecord>,
}

impl FeatureRecord {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            scripts: Vec::new(),
        }
    }

    pub fn with_script(mut self, tag: Tag, languages: impl IntoIterator<Item = Tag>) -> Self {
        self.scripts.push(ScriptRecord {
            tag,
            languages: languages.into_iter().collect(),
        });
        self
    }
}

impl ToForeign for FeatureRecord {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        tuple_of(
            py,
            vec![self.tag.to_foreign(py)?, self.scripts.to_foreign(py)?],
        )
    }
}

impl FromForeign for FeatureRecord {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        let items = record_items(object, 2, "feature record")?;
        Ok(Self {
            tag: Tag::from_foreign(&items[0])?,
            scripts: Vec::from_foreign(&items[1])?,
        })
    }
}
