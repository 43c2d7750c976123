//! Error types for s3fs-core
//!
//! Provides a unified error type for every shell operation. Errors are
//! reported to the user and the session continues, so instead of exit codes
//! each error maps to a category that describes what went wrong.

use thiserror::Error;

/// Result type alias for s3fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3fs operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required command argument was not supplied
    #[error("Missing {0}.")]
    MissingArgument(&'static str),

    /// The command verb is not recognized
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Navigation target does not exist in the backing store
    #[error("Cannot change into non-existent directory: {0}")]
    NotADirectory(String),

    /// A download target resolved to something that cannot be an object
    #[error("Target is not a file: {0}")]
    NotAFile(String),

    /// An upload destination resolved to the root, where no bucket is selected
    #[error("Missing destination bucket.")]
    MissingBucket,

    /// Storage backend call failed
    #[error("{0}")]
    Backend(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing argument or unrecognized command
    Usage,
    /// Navigation target does not exist; the path context is unchanged
    Navigation,
    /// Storage backend failure, reported verbatim
    Backend,
    /// Local file open, read or rename failure
    LocalIo,
    /// Invalid or unreadable configuration
    Config,
}

impl Error {
    /// Get the category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingArgument(_)
            | Error::UnknownCommand(_)
            | Error::NotAFile(_)
            | Error::MissingBucket => ErrorKind::Usage,
            Error::NotADirectory(_) => ErrorKind::Navigation,
            Error::Backend(_) => ErrorKind::Backend,
            Error::Io(_) => ErrorKind::LocalIo,
            Error::Config(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::InvalidUrl(_) => ErrorKind::Config,
        }
    }

    /// Build a backend error from anything displayable
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Error::Backend(err.to_string())
    }
}
