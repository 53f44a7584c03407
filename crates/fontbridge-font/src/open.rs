use crate::font::Font;
use fontbridge_logger as logger;
use fontbridge_python::{Bridge, BridgeError, Session};
use std::path::{Path, PathBuf};

/// Check that a font path exists before the runtime is involved
///
/// Runs without a session, so a missing file is reported the same way
/// whether or not fontforge is installed.
pub fn preflight(path: &Path) -> Result<PathBuf, BridgeError> {
    if path.try_exists()? {
        Ok(path.to_path_buf())
    } else {
        Err(BridgeError::FileNotFound(path.to_path_buf()))
    }
}

/// Open a font, run `f` on it and close it again
///
/// The font is closed even when `f` fails; the first error wins.
pub fn with_font<R, F>(path: &Path, f: F) -> Result<R, BridgeError>
where
    F: for<'a> FnOnce(&Bridge<'a>, &Font) -> Result<R, BridgeError>,
{
    let path = preflight(path)?;
    let session = Session::get()?;

    logger::set_current_font(
        path.file_name()
            .map(|name| name.to_string_lossy().to_string()),
    );
    let result = session.run(|bridge| {
        let font = Font::open(bridge, &path)?;
        let result = f(bridge, &font);
        let closed = font.close(bridge);
        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        }
    });
    logger::set_current_font(None);
    result
}
