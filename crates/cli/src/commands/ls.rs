//! ls command - List buckets, folders and files
//!
//! At the root this lists buckets. Inside a bucket it lists the immediate
//! children of the current prefix: every deeper key collapses into a single
//! folder entry.

use std::collections::HashSet;
use std::fmt;

use s3fs_core::{ObjectStore, PATH_DELIMITER, PATH_DELIMITER_CHAR, PathContext, Result};

use crate::output::Output;

/// A single line of `ls` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Bucket(String),
    Folder(String),
    File(String),
}

impl Entry {
    /// Classification tag printed before the name
    pub const fn tag(&self) -> &'static str {
        match self {
            Entry::Bucket(_) => "[B]",
            Entry::Folder(_) => "[D]",
            Entry::File(_) => "[F]",
        }
    }

    /// Entry name; folders keep their trailing delimiter
    pub fn name(&self) -> &str {
        match self {
            Entry::Bucket(name) | Entry::Folder(name) | Entry::File(name) => name,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag(), self.name())
    }
}

/// List the current location
pub struct Ls<'a> {
    context: &'a PathContext,
    store: &'a dyn ObjectStore,
}

impl<'a> Ls<'a> {
    pub fn new(context: &'a PathContext, store: &'a dyn ObjectStore) -> Self {
        Self { context, store }
    }

    /// Fetch the entries for the current location
    ///
    /// Nothing is written until the whole listing succeeded.
    pub async fn entries(&self) -> Result<Vec<Entry>> {
        if self.context.is_root() {
            let buckets = self.store.list_buckets().await?;
            return Ok(buckets.into_iter().map(Entry::Bucket).collect());
        }

        let prefix = match self.context.path_without_bucket() {
            path if path.is_empty() => path,
            path => path + PATH_DELIMITER,
        };
        let keys = self.store.list_objects(self.context.bucket(), &prefix).await?;
        tracing::debug!(bucket = self.context.bucket(), %prefix, keys = keys.len(), "listing");

        Ok(immediate_children(&keys, &prefix))
    }

    pub async fn execute(&self, out: &dyn Output) -> Result<()> {
        let entries = self.entries().await?;
        let mut text = String::new();
        for entry in &entries {
            text.push_str(&entry.to_string());
            text.push('\n');
        }
        out.write(&text);
        Ok(())
    }
}

/// Collapse object keys under `prefix` into the folders and files directly below it
///
/// Keys are visited in the given order and each entry is emitted once, at its
/// first occurrence. The placeholder object for the prefix itself is skipped.
pub fn immediate_children<S: AsRef<str>>(keys: &[S], prefix: &str) -> Vec<Entry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for key in keys {
        let key = key.as_ref();
        let rest = key.strip_prefix(prefix).unwrap_or(key);
        if rest.is_empty() || rest == PATH_DELIMITER {
            continue;
        }

        let entry = match rest.split_once(PATH_DELIMITER_CHAR) {
            Some((folder, _)) => Entry::Folder(format!("{folder}{PATH_DELIMITER}")),
            None => Entry::File(rest.to_string()),
        };

        if seen.insert(entry.name().to_string()) {
            entries.push(entry);
        }
    }

    entries
}
