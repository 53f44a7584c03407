//! Typed accessors for fontforge fonts and glyphs
//!
//! Each accessor is a single bridge operation on the underlying runtime
//! object; none of them reimplement font semantics.

pub mod font;
pub mod glyph;
pub mod lookups;
pub mod names;
pub mod open;
#[cfg(test)]
mod test_support;

pub use font::Font;
pub use glyph::Glyph;
pub use lookups::{LookupFlag, LookupType};
pub use names::{NameUpdates, SfntNames};
pub use open::{preflight, with_font};
