use crate::errors::CliError;
use colored::Colorize;
use fontbridge_font::{with_font, Font, SfntNames};
use fontbridge_logger as logger;
use fontbridge_python::{Bridge, BridgeError};
use semver::Version;
use std::path::Path;

/// Summary of a font, read in one session
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    pub font_name: String,
    pub family_name: String,
    pub full_name: String,
    pub em: i64,
    pub underline_position: f64,
    pub underline_width: f64,
    pub raw_version: String,
    pub version: Option<Version>,
    pub glyph_count: usize,
    pub names: SfntNames,
}

impl FontInfo {
    pub fn collect(bridge: &Bridge<'_>, font: &Font) -> Result<Self, BridgeError> {
        Ok(Self {
            font_name: font.font_name(bridge)?,
            family_name: font.family_name(bridge)?,
            full_name: font.full_name(bridge)?,
            em: font.em(bridge)?,
            underline_position: font.underline_position(bridge)?,
            underline_width: font.underline_width(bridge)?,
            raw_version: bridge.get(font.handle(), "version")?,
            version: font.version(bridge)?,
            glyph_count: font.glyph_names(bridge)?.len(),
            names: font.sfnt_names(bridge)?,
        })
    }

    pub fn render(&self) -> String {
        let version = match &self.version {
            Some(v) => v.to_string(),
            None => format!("{} {}", self.raw_version, "(unparseable)".yellow()),
        };
        let mut out = format!(
            "{}\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {} / {}\n  {}: {}\n",
            self.font_name.bold().green(),
            "family".cyan(),
            self.family_name,
            "full name".cyan(),
            self.full_name,
            "version".cyan(),
            version,
            "em".cyan(),
            self.em,
            "underline".cyan(),
            self.underline_position,
            self.underline_width,
            "glyphs".cyan(),
            self.glyph_count,
        );
        if !self.names.is_empty() {
            out.push_str(&format!("  {}:\n", "names".cyan()));
            for record in self.names.iter() {
                out.push_str(&format!(
                    "    [{}] {}: {}\n",
                    record.locale, record.key, record.value
                ));
            }
        }
        out
    }
}

pub fn handle_info(path: &Path) -> Result<(), CliError> {
    logger::spinner_start(&format!("Reading {}", path.display()));
    let info = with_font(path, FontInfo::collect);
    logger::spinner_stop();
    print!("{}", info?.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontbridge_python::NameRecord;

    fn sample(version: Option<Version>) -> FontInfo {
        FontInfo {
            font_name: "Demo-Regular".to_string(),
            family_name: "Demo".to_string(),
            full_name: "Demo Regular".to_string(),
            em: 1000,
            underline_position: -100.0,
            underline_width: 50.0,
            raw_version: "Version 1.0".to_string(),
            version,
            glyph_count: 3,
            names: SfntNames(vec![NameRecord::new("English (US)", "Family", "Demo")]),
        }
    }

    #[test]
    fn test_render_lists_fields() {
        let rendered = sample(Some(Version::new(1, 2, 0))).render();
        assert!(rendered.contains("Demo-Regular"));
        assert!(rendered.contains("1.2.0"));
        assert!(rendered.contains("-100 / 50"));
        assert!(rendered.contains("[English (US)] Family: Demo"));
    }

    #[test]
    fn test_render_unparseable_version_shows_raw() {
        let rendered = sample(None).render();
        assert!(rendered.contains("Version 1.0"));
        assert!(rendered.contains("unparseable"));
    }
}
