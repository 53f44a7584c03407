//! Foreign-value bridge to the embedded Python runtime hosting fontforge
//!
//! Objects owned by the runtime are held through [`ForeignHandle`]s, values
//! cross the boundary through [`ToForeign`] / [`FromForeign`], and every
//! attribute read, assignment and method call goes through a [`Bridge`] that
//! checks the runtime's error slot after each step. The [`Session`] owns the
//! interpreter and serializes access to it.
//!
//! ```no_run
//! use fontbridge_python::{BridgeError, Session};
//!
//! fn font_name(path: &str) -> Result<String, BridgeError> {
//!     Session::get()?.run(|bridge| {
//!         let fontforge = bridge.module()?;
//!         let font = bridge
//!             .call_method(&fontforge, "open", &[&path])?
//!             .ok_or_else(|| BridgeError::ForeignNullResult {
//!                 context: "fontforge.open".to_string(),
//!             })?;
//!         let name = bridge.get::<String>(&font, "fontname");
//!         bridge.call_method(&font, "close", &[])?;
//!         name
//!     })
//! }
//! ```

pub mod bridge;
pub mod error_channel;
pub mod errors;
pub mod handle;
mod initialization;
pub mod marshal;
pub mod records;
pub mod version;

pub use bridge::Bridge;
pub use errors::{BridgeError, RuntimeErrorKind};
pub use handle::ForeignHandle;
pub use initialization::Session;
pub use marshal::{FromForeign, ToForeign};
pub use records::{FeatureRecord, NameRecord, ScriptRecord, Tag};
pub use version::VersionError;
