use crate::version::VersionError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Category of an exception raised inside the embedded runtime
///
/// Derived from the exception's class hierarchy, so callers can match on it
/// instead of parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeErrorKind {
    FileNotFound,
    Permission,
    Os,
    Attribute,
    Key,
    Index,
    Type,
    Value,
    Import,
    /// Any other exception, carrying its class name
    Other(String),
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeErrorKind::FileNotFound => write!(f, "FileNotFoundError"),
            RuntimeErrorKind::Permission => write!(f, "PermissionError"),
            RuntimeErrorKind::Os => write!(f, "OSError"),
            RuntimeErrorKind::Attribute => write!(f, "AttributeError"),
            RuntimeErrorKind::Key => write!(f, "KeyError"),
            RuntimeErrorKind::Index => write!(f, "IndexError"),
            RuntimeErrorKind::Type => write!(f, "TypeError"),
            RuntimeErrorKind::Value => write!(f, "ValueError"),
            RuntimeErrorKind::Import => write!(f, "ImportError"),
            RuntimeErrorKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Errors surfaced by the bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Foreign call returned no object: {context}")]
    ForeignNullResult { context: String },

    #[error("Attribute '{name}' not found: {message}")]
    AttributeNotFound { name: String, message: String },

    #[error("Cannot unmarshal {found} as {expected}")]
    MarshalShapeMismatch { expected: String, found: String },

    #[error("Invalid tag '{0}': tags are at most 4 printable ASCII characters")]
    InvalidTag(String),

    #[error("Python {kind}: {message}")]
    Runtime {
        kind: RuntimeErrorKind,
        message: String,
    },

    #[error("Failed to import module '{0}': {1}")]
    Import(String, String),

    #[error("Failed to initialize Python session: {0}")]
    Initialization(String),

    #[error("Session is already running on this thread")]
    SessionBusy,

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Expected key/value pairs, got {0} arguments")]
    UnpairedArguments(usize),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl BridgeError {
    /// Category of a runtime-raised error, `None` for bridge-side errors
    pub fn runtime_kind(&self) -> Option<&RuntimeErrorKind> {
        match self {
            BridgeError::Runtime { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// True for both the pre-flight probe and a runtime `FileNotFoundError`
    pub fn is_file_not_found(&self) -> bool {
        matches!(
            self,
            BridgeError::FileNotFound(_)
                | BridgeError::Runtime {
                    kind: RuntimeErrorKind::FileNotFound,
                    ..
                }
        )
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        BridgeError::MarshalShapeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl From<fontbridge_config::ConfigError> for BridgeError {
    fn from(err: fontbridge_config::ConfigError) -> Self {
        BridgeError::Config(err.to_string())
    }
}
