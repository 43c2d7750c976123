//! ObjectStore trait definition
//!
//! This trait defines the narrow storage capability the shell needs.
//! It allows commands to be decoupled from the specific S3 SDK implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and by [`crate::MemoryStore`].
///
/// The `*_exists` checks return `Ok(false)` only when the backend reports the
/// target as missing; any other failure is returned as an error.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List bucket names in backend order
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// List every object key in `bucket` starting with `prefix`
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    /// Check if a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Check if an object with exactly this key exists
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool>;

    /// Check if at least one object key starts with `prefix`
    async fn path_exists(&self, bucket: &str, prefix: &str) -> Result<bool>;

    /// Download an object into a local temporary file and return its path
    async fn download_object(&self, bucket: &str, key: &str) -> Result<PathBuf>;

    /// Upload a local file to `key` and return the key written
    async fn upload_object(&self, bucket: &str, key: &str, local_file: &Path) -> Result<String>;
}
