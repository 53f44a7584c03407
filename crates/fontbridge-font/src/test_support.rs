//! A pure-Python stand-in for a fontforge font
//!
//! Mirrors the attributes and methods the accessors touch and records every
//! mutating call, so accessor tests run without fontforge installed.

use crate::font::Font;
use fontbridge_python::{Bridge, BridgeError};

const STAND_IN: &str = r#"
class Selection:
    def __init__(self, font):
        self.font = font
        self.selected = []

    def none(self):
        self.selected = []
        self.font.calls.append("selection.none()")

    def select(self, *names):
        self.selected.extend(names)
        self.font.calls.append("selection.select" + repr(names))


class Glyph:
    def __init__(self, name, width):
        self.glyphname = name
        self.width = width
        self.left_side_bearing = 10.0
        self.right_side_bearing = 20.0
        self.calls = []

    def transform(self, matrix):
        self.calls.append("transform" + repr((matrix,)))

    def addPosSub(self, *args):
        self.calls.append("addPosSub" + repr(args))


class Font:
    def __init__(self):
        self.fontname = "Demo-Regular"
        self.fullname = "Demo Regular"
        self.familyname = "Demo"
        self.copyright = "(c) Demo"
        self.path = "/fonts/Demo-Regular.sfd"
        self.em = 1000
        self.upos = -100.0
        self.uwidth = 50.0
        self.version = "1.2 build 110;hotconv 1.0.109"
        self.sfnt_names = (
            ("English (US)", "Copyright", "(c) Demo"),
            ("English (US)", "Family", "Demo"),
        )
        self.glyphs = {"A": Glyph("A", 600), "B": Glyph("B", 620)}
        self.selection = Selection(self)
        self.clipboard = []
        self.calls = []
        self.closed = False

    def __contains__(self, name):
        return name in self.glyphs

    def __getitem__(self, name):
        return self.glyphs[name]

    def __iter__(self):
        return iter(list(self.glyphs))

    def createChar(self, code, name):
        glyph = Glyph(name, 0)
        self.glyphs[name] = glyph
        return glyph

    def generate(self, path):
        self.calls.append("generate" + repr((path,)) + " upos=" + repr(self.upos))

    def copy(self):
        self.clipboard = [self.glyphs[name].width for name in self.selection.selected]
        self.calls.append("copy()")

    def paste(self):
        for name in self.selection.selected:
            self.glyphs[name].width = self.clipboard[0]
        self.calls.append("paste()")

    def addLookup(self, *args):
        self.calls.append("addLookup" + repr(args))

    def addLookupSubtable(self, *args):
        self.calls.append("addLookupSubtable" + repr(args))

    def addContextualSubtable(self, *args):
        self.calls.append("addContextualSubtable" + repr(args))

    def close(self):
        self.closed = True
"#;

pub(crate) fn stand_in_font(bridge: &Bridge<'_>) -> Result<Font, BridgeError> {
    let types = bridge.import("types")?;
    let builtins = bridge.import("builtins")?;
    let module = bridge
        .call_method(&types, "ModuleType", &[&"fontforge_stand_in"])?
        .ok_or(BridgeError::ForeignNullResult {
            context: "ModuleType".to_string(),
        })?;
    let namespace = bridge.get_attribute(&module, "__dict__")?;
    bridge.call_method(&builtins, "exec", &[&STAND_IN, &namespace])?;

    let font = bridge
        .call_method(&module, "Font", &[])?
        .ok_or(BridgeError::ForeignNullResult {
            context: "Font()".to_string(),
        })?;
    Ok(Font::from_handle(font))
}

pub(crate) fn recorded_calls(bridge: &Bridge<'_>, font: &Font) -> Result<Vec<String>, BridgeError> {
    bridge.get(font.handle(), "calls")
}
