//! s3fs-core: Core library for the s3fs shell
//!
//! This crate provides the core functionality for the s3fs shell, including:
//! - The virtual path context that maps buckets and keys onto a directory tree
//! - The ObjectStore trait for storage operations
//! - Configuration management
//! - Local path helpers
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing with the in-memory store.

pub mod config;
pub mod error;
pub mod local;
pub mod memory;
pub mod path;
pub mod traits;

pub use config::{ColorMode, Config, ConfigManager, ConnectionConfig, LoaderStyle, ShellConfig};
pub use error::{Error, ErrorKind, Result};
pub use memory::{Call, MemoryStore, Operation};
pub use path::{PATH_DELIMITER, PATH_DELIMITER_CHAR, PathContext};
pub use traits::ObjectStore;
