//! Parsing of the version strings fontforge hands back
//!
//! Fonts in the wild carry versions like `1.2 build 110`,
//! `2.0;hotconv 1.0.109` or ` 003.001 `. [`normalize`] strips the known
//! decorations and [`parse`] then applies a strict grammar:
//!
//! ```text
//! v?MAJOR(.MINOR)?(.PATCH)?(-PRERELEASE)?(+BUILD)?
//! ```
//!
//! Missing MINOR and PATCH default to 0. Anything else is rejected; no
//! version is ever guessed.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::num::IntErrorKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: {0:?}")]
    InvalidFormat(String),

    #[error("Version component out of range: {0}")]
    IntegerOverflow(String),
}

/// A trailing `build NNN` annotation, e.g. `1.2 build 110`
///
/// Digits and spaces are ASCII only.
static BUILD_SUFFIX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"[\t\n\x0C\r ]+build[\t\n\x0C\r ]+([0-9]+)$"));

static SEMVER: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(concat!(
        r"^v?(?P<major>[0-9]+)(?:\.(?P<minor>[0-9]+))?(?:\.(?P<patch>[0-9]+))?",
        r"(?:-(?P<pre>[0-9A-Za-z\-]+(?:\.[0-9A-Za-z\-]+)*))?",
        r"(?:\+(?P<build>[0-9A-Za-z\-]+(?:\.[0-9A-Za-z\-]+)*))?$",
    ))
});

/// Strip the decorations fontforge leaves around a version
///
/// In order: cut at the first `;`, trim surrounding whitespace, rewrite a
/// trailing `build NNN` into `+NNN`. Applying it twice changes nothing.
pub fn normalize(raw: &str) -> String {
    let head = raw.split_once(';').map_or(raw, |(head, _)| head);
    let trimmed = head.trim();
    match BUILD_SUFFIX.as_ref() {
        Ok(re) => re.replace(trimmed, "+$1").into_owned(),
        Err(_) => trimmed.to_string(),
    }
}

/// Normalize and parse a version string
pub fn parse(raw: &str) -> Result<Version, VersionError> {
    let normalized = normalize(raw);
    let re = SEMVER
        .as_ref()
        .map_err(|e| VersionError::InvalidFormat(e.to_string()))?;
    let captures = re
        .captures(&normalized)
        .ok_or_else(|| VersionError::InvalidFormat(normalized.clone()))?;

    let number = |name: &str| -> Result<u64, VersionError> {
        match captures.name(name) {
            Some(m) => parse_component(m.as_str(), &normalized),
            None => Ok(0),
        }
    };
    let major = number("major")?;
    let minor = number("minor")?;
    let patch = number("patch")?;

    let pre = match captures.name("pre") {
        Some(m) => Prerelease::new(m.as_str())
            .map_err(|_| VersionError::InvalidFormat(normalized.clone()))?,
        None => Prerelease::EMPTY,
    };
    let build = match captures.name("build") {
        Some(m) => BuildMetadata::new(m.as_str())
            .map_err(|_| VersionError::InvalidFormat(normalized.clone()))?,
        None => BuildMetadata::EMPTY,
    };

    Ok(Version {
        major,
        minor,
        patch,
        pre,
        build,
    })
}

/// Parse, or `None` when the string is not a usable version
pub fn parse_lenient(raw: &str) -> Option<Version> {
    match parse(raw) {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::debug!(raw, error = %e, "unparseable version");
            None
        }
    }
}

fn parse_component(digits: &str, normalized: &str) -> Result<u64, VersionError> {
    digits.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => VersionError::IntegerOverflow(digits.to_string()),
        _ => VersionError::InvalidFormat(normalized.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leading_zeros() {
        let v = parse("003.001");
        assert!(matches!(v, Ok(ref v) if v.to_string() == "3.1.0"));
        assert!(matches!(v, Ok(ref v) if v.pre.is_empty() && v.build.is_empty()));
    }

    #[test]
    fn test_build_suffix() {
        assert_eq!(normalize("1.2 build 110"), "1.2+110");
        let v = parse("1.2 build 110");
        assert!(matches!(
            v,
            Ok(ref v) if (v.major, v.minor, v.patch) == (1, 2, 0) && v.build.as_str() == "110"
        ));
    }

    #[test]
    fn test_semicolon_annotation() {
        assert_eq!(normalize("2.0;extra text"), "2.0");
        assert!(matches!(parse("2.0;extra text"), Ok(ref v) if v.to_string() == "2.0.0"));
    }

    #[test]
    fn test_invalid_format() {
        assert!(matches!(
            parse("not-a-version"),
            Err(VersionError::InvalidFormat(_))
        ));
        assert!(matches!(parse(""), Err(VersionError::InvalidFormat(_))));
        assert!(matches!(parse("1.2.3.4"), Err(VersionError::InvalidFormat(_))));
        assert!(matches!(parse("1..2"), Err(VersionError::InvalidFormat(_))));
        assert!(parse_lenient("Version 1.0").is_none());
    }

    #[test]
    fn test_integer_overflow() {
        assert!(matches!(
            parse("18446744073709551616.0"),
            Err(VersionError::IntegerOverflow(ref d)) if d == "18446744073709551616"
        ));
        assert!(matches!(
            parse("18446744073709551615"),
            Ok(ref v) if v.major == u64::MAX
        ));
    }

    #[test]
    fn test_prerelease_and_prefix() {
        let v = parse(" v1.4.2-beta.1+sha.5114f85 ");
        assert!(matches!(
            v,
            Ok(ref v) if v.pre.as_str() == "beta.1" && v.build.as_str() == "sha.5114f85"
        ));
        assert!(matches!(parse("1.0.0-01"), Err(VersionError::InvalidFormat(_))));
    }

    #[test]
    fn test_combined_decorations() {
        assert_eq!(normalize("  1.2 build 7 ;hotconv 1.0"), "1.2+7");
        assert_eq!(normalize("1.2 build"), "1.2 build");
        assert_eq!(normalize("1.2build 7"), "1.2build 7");
    }

    #[test]
    fn test_build_suffix_is_ascii_only() {
        assert_eq!(normalize("1 build \u{663}"), "1 build \u{663}");
        assert_eq!(normalize("1\u{3000}build 3"), "1\u{3000}build 3");
        assert_eq!(normalize("1\tbuild\t3"), "1+3");
        assert!(matches!(
            parse("1 build \u{663}"),
            Err(VersionError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_ordering_follows_semver() {
        let parsed: Vec<Version> = ["1.10", "1.2", "1.2-rc.1", "0.9 build 3"]
            .iter()
            .filter_map(|s| parse_lenient(s))
            .collect();
        let mut sorted = parsed.clone();
        sorted.sort();
        let rendered: Vec<String> = sorted.iter().map(Version::to_string).collect();
        assert_eq!(rendered, ["0.9.0+3", "1.2.0-rc.1", "1.2.0", "1.10.0"]);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_version_like_input(
            core in "[0-9]{1,3}(\\.[0-9]{1,3}){0,2}",
            build in proptest::option::of("[0-9]{1,4}"),
            tail in proptest::option::of(";[ -~]{0,12}"),
            pad in "[ \t]{0,3}",
        ) {
            let mut raw = format!("{pad}{core}");
            if let Some(build) = build {
                raw.push_str(&format!(" build {build}"));
            }
            if let Some(tail) = tail {
                raw.push_str(&tail);
            }
            raw.push_str(&pad);

            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(parse(&once).is_ok());
        }
    }
}
