//! Errors reported by CLI commands

use fontbridge_config::ConfigError;
use fontbridge_python::{BridgeError, VersionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Version(#[from] VersionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bridge_errors_display_unchanged() {
        let err = CliError::from(BridgeError::FileNotFound(PathBuf::from("missing.sfd")));
        assert_eq!(err.to_string(), "File not found: missing.sfd");
    }

    #[test]
    fn test_version_error_display() {
        let err = CliError::from(VersionError::InvalidFormat("x".to_string()));
        assert_eq!(err.to_string(), "Invalid version format: \"x\"");
    }
}
