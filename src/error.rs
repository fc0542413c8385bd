use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the psdfx application
#[derive(Debug)]
pub enum Error {
    /// IO operations errors
    Io(io::Error),
    /// Invalid file or directory path
    InvalidPath(PathBuf),
    /// Configuration errors
    Config(String),
    /// Scene dump loading or traversal errors
    Scene(String),
    /// External scanner subprocess errors
    Scanner(String),
    /// JSON serialization/deserialization errors
    Json(serde_json::Error),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::InvalidPath(path) => write!(f, "Invalid path: {}", path.display()),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Scene(msg) => write!(f, "Scene error: {}", msg),
            Error::Scanner(msg) => write!(f, "Scanner error: {}", msg),
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

/// Result type alias for psdfx operations
pub type Result<T> = std::result::Result<T, Error>;
