//! Typed error handling for dllscan.
//!
//! Every failure is terminal for a run. Each variant names the pipeline
//! stage that failed so the CLI can report it without guessing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dllscan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The input source file could not be opened or read
    #[error("Failed to open source file {path}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `#define` bound to the export attribute was found
    #[error("No {attribute} export macro found in source file {path}")]
    MacroNotFound { path: PathBuf, attribute: String },

    /// The output manifest could not be created or written
    #[error("Failed to write output file {path}: {source}")]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema version argument is not a base-10 integer
    #[error("Invalid schema version {value:?}: expected a base-10 integer")]
    InvalidSchemaVersion { value: String },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ScanError {
    /// Create an input error with path context.
    pub fn input(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::InputNotFound {
            path: path.into(),
            source: err,
        }
    }

    /// Create an output error with path context.
    pub fn output(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::OutputNotWritable {
            path: path.into(),
            source: err,
        }
    }

    /// Create a missing-macro error.
    pub fn macro_not_found(path: impl Into<PathBuf>, attribute: impl Into<String>) -> Self {
        Self::MacroNotFound {
            path: path.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "read",
            Self::MacroNotFound { .. } => "detect",
            Self::OutputNotWritable { .. } => "write",
            Self::InvalidSchemaVersion { .. } => "arguments",
            Self::Config { .. } => "config",
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InputNotFound { path, .. } => Some(path),
            Self::MacroNotFound { path, .. } => Some(path),
            Self::OutputNotWritable { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::InvalidSchemaVersion { .. } => None,
        }
    }
}

/// Convenience type alias for dllscan results.
pub type ScanResult<T> = Result<T, ScanError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Map the error to [`ScanError::InputNotFound`].
    fn input_path(self, path: impl Into<PathBuf>) -> ScanResult<T>;

    /// Map the error to [`ScanError::OutputNotWritable`].
    fn output_path(self, path: impl Into<PathBuf>) -> ScanResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn input_path(self, path: impl Into<PathBuf>) -> ScanResult<T> {
        self.map_err(|e| ScanError::input(path, e))
    }

    fn output_path(self, path: impl Into<PathBuf>) -> ScanResult<T> {
        self.map_err(|e| ScanError::output(path, e))
    }
}
