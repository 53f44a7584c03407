//! fontbridge CLI library - exposes command handlers for testing

pub mod commands;
pub mod common;
pub mod errors;

pub use common::GlobalOpts;
