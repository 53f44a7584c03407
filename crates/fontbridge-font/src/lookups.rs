//! OpenType lookup creation
//!
//! Lookups, their subtables and features are created entirely by fontforge;
//! this module only names the arguments.

use crate::font::Font;
use fontbridge_python::{Bridge, BridgeError, FeatureRecord, ToForeign};
use pyo3::prelude::*;
use std::fmt;

/// Kind of lookup passed to `addLookup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupType {
    GsubSingle,
    GsubContextChain,
}

impl LookupType {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupType::GsubSingle => "gsub_single",
            LookupType::GsubContextChain => "gsub_contextchain",
        }
    }
}

impl fmt::Display for LookupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToForeign for LookupType {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.as_str().to_foreign(py)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFlag {
    RightToLeft,
    IgnoreBases,
    IgnoreLigatures,
    IgnoreMarks,
}

impl LookupFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupFlag::RightToLeft => "right_to_left",
            LookupFlag::IgnoreBases => "ignore_bases",
            LookupFlag::IgnoreLigatures => "ignore_ligatures",
            LookupFlag::IgnoreMarks => "ignore_marks",
        }
    }
}

impl ToForeign for LookupFlag {
    fn to_foreign<'py>(&self, py: Python<'py>) -> Result<Bound<'py, PyAny>, BridgeError> {
        self.as_str().to_foreign(py)
    }
}

impl Font {
    /// Create a lookup registered for the given features
    pub fn add_lookup(
        &self,
        bridge: &Bridge<'_>,
        name: &str,
        kind: LookupType,
        flags: &[LookupFlag],
        features: &[FeatureRecord],
    ) -> Result<(), BridgeError> {
        tracing::debug!(name, %kind, "addLookup");
        self.call_discarding(bridge, "addLookup", &[&name, &kind, &flags, &features])
    }

    pub fn add_lookup_subtable(
        &self,
        bridge: &Bridge<'_>,
        lookup: &str,
        subtable: &str,
    ) -> Result<(), BridgeError> {
        self.call_discarding(bridge, "addLookupSubtable", &[&lookup, &subtable])
    }

    /// Add a contextual subtable; `format` and `rule` use fontforge's syntax
    pub fn add_contextual_subtable(
        &self,
        bridge: &Bridge<'_>,
        lookup: &str,
        subtable: &str,
        format: &str,
        rule: &str,
    ) -> Result<(), BridgeError> {
        self.call_discarding(
            bridge,
            "addContextualSubtable",
            &[&lookup, &subtable, &format, &rule],
        )
    }
}
