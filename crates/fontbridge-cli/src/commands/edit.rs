//! Commands that change a font and write it back out

use crate::errors::CliError;
use fontbridge_font::{with_font, Font, NameUpdates};
use fontbridge_logger as logger;
use fontbridge_python::{version, Bridge, BridgeError};
use std::path::Path;

/// Write `font` to `output`: fontforge source files are saved, anything
/// else is generated in the format the extension names
pub fn write_font(bridge: &Bridge<'_>, font: &Font, output: &Path) -> Result<(), BridgeError> {
    if is_source_file(output) {
        font.save(bridge, output)
    } else {
        font.generate(bridge, output)
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sfd"))
}

fn finish(result: Result<(), BridgeError>, message: &str) -> Result<(), CliError> {
    match result {
        Ok(()) => {
            logger::spinner_success(message);
            Ok(())
        }
        Err(e) => {
            logger::spinner_error("Font was not written");
            Err(e.into())
        }
    }
}

pub fn handle_set_names(font: &Path, pairs: &[String], output: &Path) -> Result<(), CliError> {
    let updates = NameUpdates::from_flat(pairs)?;

    logger::spinner_start(&format!("Updating names in {}", font.display()));
    let result = with_font(font, |bridge, font| {
        font.set_sfnt_names(bridge, &updates)?;
        write_font(bridge, font, output)
    });
    finish(result, &format!("Wrote {}", output.display()))
}

pub fn handle_set_version(font: &Path, raw: &str, output: &Path) -> Result<(), CliError> {
    let new_version = version::parse(raw)?;

    logger::spinner_start(&format!("Setting version of {}", font.display()));
    let result = with_font(font, |bridge, font| {
        if let Some(old) = font.version(bridge)? {
            logger::info(&format!("Replacing version {}", old));
        }
        font.set_version(bridge, &new_version)?;
        write_font(bridge, font, output)
    });
    finish(
        result,
        &format!("Wrote {} (version {})", output.display(), new_version),
    )
}
