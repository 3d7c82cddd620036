//! Error types for preset and configuration operations.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::validation::ValidationError;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    /// Reading a preset file.
    Read,
    /// Writing a preset file.
    Write,
    /// Creating a preset directory.
    CreateDir,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IoOp::Read => "read file",
            IoOp::Write => "write file",
            IoOp::CreateDir => "create directory",
        })
    }
}

/// Errors from loading, saving, resolving or validating presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A filesystem operation on `path` failed.
    #[error("failed to {op} '{}': {source}", path.display())]
    Io {
        /// What was being attempted.
        op: IoOp,
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset text is not valid TOML or has the wrong shape.
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Preset could not be written as TOML.
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No preset file or factory preset with this name.
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Preset names a parameter the waveshaper does not have.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Stored values failed range checks.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    fn io(op: IoOp, path: &Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Reading `path` failed.
    pub fn read_file(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::io(IoOp::Read, path.as_ref(), source)
    }

    /// Writing `path` failed.
    pub fn write_file(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::io(IoOp::Write, path.as_ref(), source)
    }

    /// Creating the directory `path` failed.
    pub fn create_dir(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::io(IoOp::CreateDir, path.as_ref(), source)
    }

    /// Path involved, for filesystem errors.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}
