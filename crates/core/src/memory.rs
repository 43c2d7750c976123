//! In-memory object store
//!
//! A deterministic [`ObjectStore`] that keeps buckets and objects in memory.
//! Used by tests and by the `--memory` mode of the shell. Every call is
//! recorded so callers can assert which backend operations were issued, and
//! any operation can be made to fail on demand.

use std::collections::{BTreeMap, HashSet};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::traits::ObjectStore;

/// A storage operation, as recorded in the call log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListBuckets,
    ListObjects,
    BucketExists,
    ObjectExists,
    PathExists,
    DownloadObject,
    UploadObject,
}

/// A recorded call: the operation and its string arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: Operation,
    pub args: Vec<String>,
}

type Buckets = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

#[derive(Debug, Default)]
struct State {
    buckets: Buckets,
    calls: Vec<Call>,
    failing: HashSet<Operation>,
}

/// In-memory object store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty bucket
    pub fn with_bucket(self, bucket: &str) -> Self {
        self.lock().buckets.entry(bucket.to_string()).or_default();
        self
    }

    /// Add an object, creating its bucket if needed
    pub fn with_object(self, bucket: &str, key: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert(bucket, key, data);
        self
    }

    /// Insert or overwrite an object, creating its bucket if needed
    pub fn insert(&self, bucket: &str, key: &str, data: impl Into<Vec<u8>>) {
        self.lock()
            .buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), data.into());
    }

    /// Get a copy of an object's contents
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.lock()
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    /// Make every future call of `operation` fail with a backend error
    pub fn fail(&self, operation: Operation) {
        self.lock().failing.insert(operation);
    }

    /// All calls recorded so far
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls of `operation`
    pub fn call_count(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    /// A small sample namespace for the demo mode
    pub fn sample() -> Self {
        Self::new()
            .with_object("photos", "2024/beach.jpg", b"jpeg".to_vec())
            .with_object("photos", "2024/city/night.jpg", b"jpeg".to_vec())
            .with_object("photos", "README.txt", b"holiday photos\n".to_vec())
            .with_object("website", "index.html", b"<html></html>\n".to_vec())
            .with_object("website", "assets/", Vec::new())
            .with_object("website", "assets/site.css", b"body {}\n".to_vec())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a call and fail it if requested
    fn record(&self, operation: Operation, args: &[&str]) -> Result<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(Call {
            operation,
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        if state.failing.contains(&operation) {
            return Err(Error::Backend(format!("{operation:?} failed")));
        }
        Ok(state)
    }
}

fn no_such_bucket(bucket: &str) -> Error {
    Error::Backend(format!("NoSuchBucket: {bucket}"))
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let state = self.record(Operation::ListBuckets, &[])?;
        Ok(state.buckets.keys().cloned().collect())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let state = self.record(Operation::ListObjects, &[bucket, prefix])?;
        let objects = state.buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let state = self.record(Operation::BucketExists, &[bucket])?;
        Ok(state.buckets.contains_key(bucket))
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        let state = self.record(Operation::ObjectExists, &[bucket, key])?;
        Ok(state
            .buckets
            .get(bucket)
            .is_some_and(|objects| objects.contains_key(key)))
    }

    async fn path_exists(&self, bucket: &str, prefix: &str) -> Result<bool> {
        let state = self.record(Operation::PathExists, &[bucket, prefix])?;
        Ok(state
            .buckets
            .get(bucket)
            .is_some_and(|objects| objects.keys().any(|key| key.starts_with(prefix))))
    }

    async fn download_object(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let data = {
            let state = self.record(Operation::DownloadObject, &[bucket, key])?;
            let objects = state.buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
            objects
                .get(key)
                .cloned()
                .ok_or_else(|| Error::Backend(format!("NoSuchKey: {key}")))?
        };

        let mut file = tempfile::Builder::new().prefix("s3fs-").tempfile()?;
        file.write_all(&data)?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        Ok(path)
    }

    async fn upload_object(&self, bucket: &str, key: &str, local_file: &Path) -> Result<String> {
        self.record(Operation::UploadObject, &[bucket, key])?;
        let data = tokio::fs::read(local_file).await?;

        let mut state = self.lock();
        let objects = state
            .buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?;
        objects.insert(key.to_string(), data);
        Ok(key.to_string())
    }
}
