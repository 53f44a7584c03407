//! Path resolution inside a Python virtual environment
//!
//! The embedded interpreter does not know about the venv on its own; the
//! session adds its site-packages to `sys.path` and may export PYTHONHOME
//! from `pyvenv.cfg` so that `fontforge` installed there becomes importable.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// "Lib" on Windows, "lib" on Unix
#[cfg(windows)]
pub const PYTHON_LIB_DIR: &str = "Lib";
#[cfg(not(windows))]
pub const PYTHON_LIB_DIR: &str = "lib";

/// "Scripts" on Windows, "bin" on Unix
#[cfg(windows)]
pub const PYTHON_BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const PYTHON_BIN_DIR: &str = "bin";

pub const SITE_PACKAGES: &str = "site-packages";

#[cfg(not(windows))]
const PYTHON_EXE_CANDIDATES: &[&str] = &["python3", "python"];
#[cfg(windows)]
const PYTHON_EXE_CANDIDATES: &[&str] = &["python.exe", "python3.exe"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenvPathError {
    #[error("Virtual environment not found: {}", .0.display())]
    VenvNotFound(PathBuf),

    #[error("{0}")]
    PathResolution(String),
}

/// Resolve the site-packages directory of a venv
///
/// - **Unix/macOS**: `<venv>/lib/python3.X/site-packages`
/// - **Windows**: `<venv>/Lib/site-packages`
pub fn resolve_site_packages(venv_path: &Path) -> Result<PathBuf, VenvPathError> {
    if !venv_path.is_dir() {
        return Err(VenvPathError::VenvNotFound(venv_path.to_path_buf()));
    }

    let lib_dir = venv_path.join(PYTHON_LIB_DIR);
    if !lib_dir.is_dir() {
        return Err(VenvPathError::PathResolution(format!(
            "lib directory not found: {}",
            lib_dir.display()
        )));
    }

    #[cfg(windows)]
    let site_packages = lib_dir.join(SITE_PACKAGES);

    #[cfg(not(windows))]
    let site_packages = fs::read_dir(&lib_dir)
        .map_err(|e| VenvPathError::PathResolution(format!("Failed to read lib dir: {}", e)))?
        .filter_map(|e| e.ok())
        .find(|e| e.file_name().to_string_lossy().starts_with("python"))
        .ok_or_else(|| {
            VenvPathError::PathResolution("No python3.X directory found in venv/lib".to_string())
        })?
        .path()
        .join(SITE_PACKAGES);

    if !site_packages.is_dir() {
        return Err(VenvPathError::PathResolution(format!(
            "site-packages not found: {}",
            site_packages.display()
        )));
    }
    Ok(site_packages)
}

/// Resolve the interpreter executable of a venv
pub fn resolve_python_exe(venv_path: &Path) -> Result<PathBuf, VenvPathError> {
    if !venv_path.is_dir() {
        return Err(VenvPathError::VenvNotFound(venv_path.to_path_buf()));
    }

    let bin_dir = venv_path.join(PYTHON_BIN_DIR);
    PYTHON_EXE_CANDIDATES
        .iter()
        .map(|exe| bin_dir.join(exe))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            VenvPathError::PathResolution(format!(
                "Python executable not found in {}",
                bin_dir.display()
            ))
        })
}

/// Resolve PYTHONHOME from the venv's `pyvenv.cfg`
///
/// The `home` entry names the base interpreter's bin directory, so its
/// parent is returned.
pub fn resolve_python_home(venv_path: &Path) -> Result<PathBuf, VenvPathError> {
    let pyvenv_cfg = venv_path.join("pyvenv.cfg");
    let content = fs::read_to_string(&pyvenv_cfg).map_err(|e| {
        VenvPathError::PathResolution(format!(
            "Failed to read {}: {}",
            pyvenv_cfg.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "home")
        .map(|(_, value)| {
            let home_bin = PathBuf::from(value.trim());
            home_bin.parent().map(Path::to_path_buf).unwrap_or(home_bin)
        })
        .ok_or_else(|| {
            VenvPathError::PathResolution(format!(
                "Could not find 'home' in {}",
                pyvenv_cfg.display()
            ))
        })
}
