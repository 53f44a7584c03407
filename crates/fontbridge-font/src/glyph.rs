use crate::font::{accessors, call_discarding};
use fontbridge_python::{Bridge, BridgeError, ForeignHandle};

/// One glyph of an open font
#[derive(Debug)]
pub struct Glyph {
    handle: ForeignHandle,
}

impl Glyph {
    pub fn from_handle(handle: ForeignHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    /// Give the glyph reference back; the glyph stays in its font
    pub fn close(self, bridge: &Bridge<'_>) {
        self.handle.release(bridge);
    }

    accessors! {
        glyph_name, set_glyph_name: String, &str => "glyphname";
        /// Advance width
        width, set_width: i64, i64 => "width";
        left_side_bearing, set_left_side_bearing: f64, f64 => "left_side_bearing";
        right_side_bearing, set_right_side_bearing: f64, f64 => "right_side_bearing";
    }

    /// Apply a PostScript-style affine matrix `[xx, xy, yx, yy, dx, dy]`
    pub fn transform(&self, bridge: &Bridge<'_>, matrix: [f64; 6]) -> Result<(), BridgeError> {
        call_discarding(bridge, self.handle(), "transform", &[&matrix])
    }

    /// Register `variant` as this glyph's substitute in a lookup subtable
    pub fn add_pos_sub(
        &self,
        bridge: &Bridge<'_>,
        subtable: &str,
        variant: &str,
    ) -> Result<(), BridgeError> {
        call_discarding(bridge, self.handle(), "addPosSub", &[&subtable, &variant])
    }
}
