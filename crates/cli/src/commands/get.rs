//! get command - Download an object to the local filesystem
//!
//! The object is materialized in a temporary file by the store and then
//! moved into place, so a failed download never leaves a partial file at the
//! destination.

use std::path::{Path, PathBuf};

use s3fs_core::local::{expand_home, move_file};
use s3fs_core::path::{join_segments, object_key, with_trailing_delimiter};
use s3fs_core::{Error, ObjectStore, PathContext, Result};

use crate::output::Output;

pub struct Get<'a> {
    context: &'a PathContext,
    store: &'a dyn ObjectStore,
    target: Option<String>,
    destination: Option<String>,
    working_dir: Option<PathBuf>,
}

impl<'a> Get<'a> {
    pub fn new(
        context: &'a PathContext,
        store: &'a dyn ObjectStore,
        target: Option<String>,
        destination: Option<String>,
    ) -> Self {
        Self {
            context,
            store,
            target,
            destination,
            working_dir: None,
        }
    }

    /// Resolve relative destinations against `dir` instead of the process working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub async fn execute(self, out: &dyn Output) -> Result<()> {
        let target = self
            .target
            .as_deref()
            .ok_or(Error::MissingArgument("target file"))?;

        let resolved = self.context.calculate_path(target);
        let (bucket, file_name) = match resolved.as_slice() {
            [bucket, .., file_name] => (bucket, file_name),
            _ => {
                return Err(Error::NotAFile(with_trailing_delimiter(join_segments(
                    &resolved,
                ))));
            }
        };
        let key = object_key(&resolved);

        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let destination =
            resolve_destination(self.destination.as_deref(), file_name, &working_dir)?;

        let temp = self.store.download_object(bucket, &key).await?;
        if let Err(e) = move_file(&temp, &destination) {
            if let Err(cleanup) = std::fs::remove_file(&temp) {
                tracing::warn!(path = %temp.display(), "failed to remove temporary file: {cleanup}");
            }
            return Err(e);
        }

        let size = std::fs::metadata(&destination)?.len();
        out.write(&format!(
            "File downloaded: {} ({})\n",
            destination.display(),
            humansize::format_size(size, humansize::DECIMAL)
        ));
        Ok(())
    }
}

/// Work out where a downloaded object should land
///
/// - No argument: `default_name` inside `working_dir`.
/// - An existing directory: `default_name` inside it.
/// - Anything else: that exact file path.
///
/// A leading `~` is expanded and relative paths are joined onto `working_dir`.
pub fn resolve_destination(
    arg: Option<&str>,
    default_name: &str,
    working_dir: &Path,
) -> Result<PathBuf> {
    let Some(arg) = arg else {
        return Ok(working_dir.join(default_name));
    };

    let path = expand_home(arg)?;
    let path = if path.is_absolute() {
        path
    } else {
        working_dir.join(path)
    };

    if path.is_dir() {
        Ok(path.join(default_name))
    } else {
        Ok(path)
    }
}
