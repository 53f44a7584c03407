use crate::glyph::Glyph;
use crate::names::{NameUpdates, SfntNames};
use crate::open::preflight;
use fontbridge_logger as logger;
use fontbridge_python::{version, Bridge, BridgeError, ForeignHandle, ToForeign};
use semver::Version;
use std::path::Path;

/// Getter/setter pairs that map one-to-one onto a runtime attribute
macro_rules! accessors {
    ($( $(#[$doc:meta])* $get:ident, $set:ident: $ty:ty, $arg:ty => $attr:literal; )*) => {
        $(
            $(#[$doc])*
            pub fn $get(&self, bridge: &Bridge<'_>) -> Result<$ty, BridgeError> {
                bridge.get(self.handle(), $attr)
            }

            pub fn $set(&self, bridge: &Bridge<'_>, value: $arg) -> Result<(), BridgeError> {
                bridge.set(self.handle(), $attr, &value)
            }
        )*
    };
}

pub(crate) use accessors;

/// An open fontforge font
///
/// Owns one reference to the runtime's font object. [`Font::close`] closes
/// the font in fontforge and then gives the reference back.
#[derive(Debug)]
pub struct Font {
    handle: ForeignHandle,
}

impl Font {
    /// Open a font file through `fontforge.open`
    ///
    /// A path that does not exist fails with [`BridgeError::FileNotFound`]
    /// before the runtime is asked.
    pub fn open(bridge: &Bridge<'_>, path: &Path) -> Result<Self, BridgeError> {
        let path = preflight(path)?;
        let fontforge = bridge.module()?;
        let handle = bridge
            .call_method(&fontforge, "open", &[&path])?
            .ok_or_else(|| BridgeError::ForeignNullResult {
                context: format!("fontforge.open({})", path.display()),
            })?;
        fontforge.release(bridge);
        logger::debug(&format!("Opened {}", path.display()));
        Ok(Self { handle })
    }

    /// Wrap a font object obtained some other way
    pub fn from_handle(handle: ForeignHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    pub fn close(self, bridge: &Bridge<'_>) -> Result<(), BridgeError> {
        let closed = self.call_discarding(bridge, "close", &[]);
        self.handle.release(bridge);
        closed
    }

    accessors! {
        font_name, set_font_name: String, &str => "fontname";
        full_name, set_full_name: String, &str => "fullname";
        family_name, set_family_name: String, &str => "familyname";
        copyright, set_copyright: String, &str => "copyright";
        /// Units per em
        em, set_em: i64, i64 => "em";
        underline_position, set_underline_position: f64, f64 => "upos";
        underline_width, set_underline_width: f64, f64 => "uwidth";
    }

    /// File the font was loaded from
    pub fn path(&self, bridge: &Bridge<'_>) -> Result<String, BridgeError> {
        bridge.get(self.handle(), "path")
    }

    pub fn sfnt_names(&self, bridge: &Bridge<'_>) -> Result<SfntNames, BridgeError> {
        bridge.get(self.handle(), "sfnt_names")
    }

    /// Replace the values of existing name records, keeping all others
    pub fn set_sfnt_names(
        &self,
        bridge: &Bridge<'_>,
        updates: &NameUpdates,
    ) -> Result<(), BridgeError> {
        let names = self.sfnt_names(bridge)?;
        for key in updates.unmatched(&names) {
            logger::warn(&format!("Font has no '{}' name record; skipping", key));
        }
        bridge.set(self.handle(), "sfnt_names", &updates.apply(names))
    }

    /// The font version, or `None` when it is not a recognisable version
    pub fn version(&self, bridge: &Bridge<'_>) -> Result<Option<Version>, BridgeError> {
        let raw: String = bridge.get(self.handle(), "version")?;
        Ok(version::parse_lenient(&raw))
    }

    pub fn set_version(&self, bridge: &Bridge<'_>, version: &Version) -> Result<(), BridgeError> {
        bridge.set(self.handle(), "version", &version.to_string())
    }

    pub fn has_glyph(&self, bridge: &Bridge<'_>, name: &str) -> Result<bool, BridgeError> {
        bridge.has_item(self.handle(), &name)
    }

    /// Look a glyph up by name; a missing glyph is `None`
    pub fn glyph(&self, bridge: &Bridge<'_>, name: &str) -> Result<Option<Glyph>, BridgeError> {
        if !self.has_glyph(bridge, name)? {
            return Ok(None);
        }
        Ok(bridge.get_item(self.handle(), &name)?.map(Glyph::from_handle))
    }

    /// Create an unencoded glyph
    pub fn create_glyph(&self, bridge: &Bridge<'_>, name: &str) -> Result<Glyph, BridgeError> {
        bridge
            .call_method(self.handle(), "createChar", &[&-1_i64, &name])?
            .map(Glyph::from_handle)
            .ok_or_else(|| BridgeError::ForeignNullResult {
                context: format!("createChar({})", name),
            })
    }

    /// Names of all glyphs, in the font's iteration order
    pub fn glyph_names(&self, bridge: &Bridge<'_>) -> Result<Vec<String>, BridgeError> {
        bridge.iterate(self.handle())
    }

    /// Write the font out in the format implied by `path`
    ///
    /// fontforge reads the underline position as the top of the stroke, so it
    /// is shifted down by the underline width before generating.
    pub fn generate(&self, bridge: &Bridge<'_>, path: &Path) -> Result<(), BridgeError> {
        let upos = self.underline_position(bridge)?;
        let uwidth = self.underline_width(bridge)?;
        self.set_underline_position(bridge, upos + uwidth)?;

        logger::debug(&format!("Generating {}", path.display()));
        self.call_discarding(bridge, "generate", &[&path])
    }

    /// Save as a fontforge source file (`.sfd`)
    pub fn save(&self, bridge: &Bridge<'_>, path: &Path) -> Result<(), BridgeError> {
        logger::debug(&format!("Saving {}", path.display()));
        self.call_discarding(bridge, "save", &[&path])
    }

    /// Copy one glyph into fontforge's clipboard
    pub fn copy_glyph(&self, bridge: &Bridge<'_>, name: &str) -> Result<(), BridgeError> {
        self.select_only(bridge, name)?;
        self.call_discarding(bridge, "copy", &[])
    }

    /// Paste the clipboard over one glyph
    pub fn paste_glyph(&self, bridge: &Bridge<'_>, name: &str) -> Result<(), BridgeError> {
        self.select_only(bridge, name)?;
        self.call_discarding(bridge, "paste", &[])
    }

    fn select_only(&self, bridge: &Bridge<'_>, name: &str) -> Result<(), BridgeError> {
        let selection = bridge.get_attribute(self.handle(), "selection")?;
        let result = bridge
            .call_method(&selection, "none", &[])
            .and_then(|_| bridge.call_method(&selection, "select", &[&name]));
        selection.release(bridge);
        result.map(|_| ())
    }

    pub(crate) fn call_discarding(
        &self,
        bridge: &Bridge<'_>,
        method: &str,
        args: &[&dyn ToForeign],
    ) -> Result<(), BridgeError> {
        call_discarding(bridge, self.handle(), method, args)
    }
}

/// Call a method for its effect and release whatever it returns
pub(crate) fn call_discarding(
    bridge: &Bridge<'_>,
    handle: &ForeignHandle,
    method: &str,
    args: &[&dyn ToForeign],
) -> Result<(), BridgeError> {
    if let Some(result) = bridge.call_method(handle, method, args)? {
        result.release(bridge);
    }
    Ok(())
}
