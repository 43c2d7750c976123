//! Virtual path context
//!
//! Object storage has no directories, only buckets and flat keys. The shell
//! presents them as a tree: the first path segment is the bucket and every
//! following segment is a key prefix component (a simulated folder).
//!
//! Path resolution is pure string arithmetic and never touches the backend.

use std::fmt;

/// Delimiter between virtual path segments and object key components
pub const PATH_DELIMITER: &str = "/";

/// [`PATH_DELIMITER`] as a `char`
pub const PATH_DELIMITER_CHAR: char = '/';

const PARENT: &str = "..";
const CURRENT: &str = ".";

/// The current virtual working directory of a shell session
///
/// Zero segments is the root (no bucket selected), one segment is the root of
/// a bucket, and two or more segments are a nested prefix within a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathContext {
    segments: Vec<String>,
}

impl PathContext {
    /// Create a context at the root
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context positioned at `path`, resolved from the root
    pub fn with_path(path: &str) -> Self {
        let mut context = Self::new();
        context.update_path(path);
        context
    }

    /// Resolve `input` against the current path and commit the result
    ///
    /// This is the only way to change the context.
    pub fn update_path(&mut self, input: &str) {
        self.segments = self.calculate_path(input);
    }

    /// Resolve `input` against the current path without committing it
    ///
    /// - An empty input resolves to the current path.
    /// - A leading delimiter makes the input absolute (resolved from root).
    /// - `..` removes the last segment; at the root it does nothing.
    /// - `.` and empty tokens are ignored.
    /// - Any other token is appended.
    pub fn calculate_path(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return self.segments.clone();
        }

        let (mut segments, rest) = match input.strip_prefix(PATH_DELIMITER_CHAR) {
            Some(rest) => (Vec::new(), rest),
            None => (self.segments.clone(), input),
        };

        for token in rest.split(PATH_DELIMITER_CHAR) {
            match token {
                PARENT => {
                    segments.pop();
                }
                CURRENT | "" => {}
                other => segments.push(other.to_string()),
            }
        }

        segments
    }

    /// Whether no bucket is selected
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Current bucket name, empty at the root
    pub fn bucket(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }

    /// Full path: every segment joined by the delimiter
    pub fn path(&self) -> String {
        self.segments.join(PATH_DELIMITER)
    }

    /// Path within the current bucket, empty at the root or a bucket root
    pub fn path_without_bucket(&self) -> String {
        if self.segments.len() <= 1 {
            return String::new();
        }
        self.segments[1..].join(PATH_DELIMITER)
    }
}

impl fmt::Display for PathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path(), PATH_DELIMITER)
    }
}

/// Join the key components of a resolved path (every segment after the bucket)
pub fn object_key(segments: &[String]) -> String {
    segments.get(1..).unwrap_or_default().join(PATH_DELIMITER)
}

/// Key of the placeholder that marks a folder, always delimiter-terminated
///
/// Object stores only report a folder through keys that share its prefix, so
/// probing without the trailing delimiter would also match `folder-other`
/// and miss `folder/` itself.
pub fn folder_key(segments: &[String]) -> String {
    with_trailing_delimiter(object_key(segments))
}

/// Append the delimiter unless `key` already ends with it
pub fn with_trailing_delimiter(key: String) -> String {
    if key.ends_with(PATH_DELIMITER_CHAR) {
        key
    } else {
        key + PATH_DELIMITER
    }
}

/// Join resolved segments back into a display path
pub fn join_segments(segments: &[String]) -> String {
    segments.join(PATH_DELIMITER)
}
