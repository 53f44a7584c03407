//! The SFNT name table and updates to it

use fontbridge_python::{BridgeError, FromForeign, NameRecord, ToForeign};
use pyo3::prelude::*;

/// A font's `sfnt_names`, in the order fontforge reports them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfntNames(pub Vec<NameRecord>);

impl SfntNames {
    /// Value of the first record with this key, in any locale
    pub fn find(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|record| record.key == key)
            .map(|record| record.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ToForeign for SfntNames {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.0.to_foreign(py)
    }
}

impl FromForeign for SfntNames {
    fn from_foreign(object: &Bound<'_, PyAny>) -> Result<Self, BridgeError> {
        Vec::from_foreign(object).map(SfntNames)
    }
}

/// New values for existing name keys
///
/// Updates only ever replace the value of records whose key is already
/// present; they never add records. When a key is given twice the later
/// value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameUpdates(Vec<(String, String)>);

impl NameUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair up a flat `key value key value ...` list
    pub fn from_flat<S: AsRef<str>>(items: &[S]) -> Result<Self, BridgeError> {
        if items.len() % 2 != 0 {
            return Err(BridgeError::UnpairedArguments(items.len()));
        }
        Ok(Self(
            items
                .chunks_exact(2)
                .map(|pair| (pair[0].as_ref().to_string(), pair[1].as_ref().to_string()))
                .collect(),
        ))
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    fn value_for(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Apply the updates, keeping every record and its order
    pub fn apply(&self, mut names: SfntNames) -> SfntNames {
        for record in &mut names.0 {
            if let Some(value) = self.value_for(&record.key) {
                record.value = value.to_string();
            }
        }
        names
    }

    /// Keys that match no record in `names`, each once, in first-seen order
    pub fn unmatched<'a>(&'a self, names: &SfntNames) -> Vec<&'a str> {
        let mut keys: Vec<&str> = Vec::new();
        for (key, _) in &self.0 {
            if names.find(key).is_none() && !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }
}
