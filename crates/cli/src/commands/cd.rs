//! cd command - Change the current virtual directory
//!
//! Object storage has no directories: a folder exists only while some key
//! starts with it. The target is therefore checked before the path context is
//! touched, and navigation either fully succeeds or leaves it unchanged.

use s3fs_core::path::{folder_key, join_segments, with_trailing_delimiter};
use s3fs_core::{Error, ObjectStore, PathContext, Result};

pub struct Cd<'a> {
    context: &'a mut PathContext,
    store: &'a dyn ObjectStore,
    target: Option<String>,
}

impl<'a> Cd<'a> {
    pub fn new(
        context: &'a mut PathContext,
        store: &'a dyn ObjectStore,
        target: Option<String>,
    ) -> Self {
        Self {
            context,
            store,
            target,
        }
    }

    /// Only navigation away from the root needs an existence check
    pub fn is_long_running(&self) -> bool {
        self.target
            .as_deref()
            .is_some_and(|target| !self.context.calculate_path(target).is_empty())
    }

    pub async fn execute(self) -> Result<()> {
        let Some(target) = self.target else {
            return Ok(());
        };

        let resolved = self.context.calculate_path(&target);
        let exists = match resolved.as_slice() {
            [] => true,
            [bucket] => self.store.bucket_exists(bucket).await?,
            [bucket, ..] => {
                self.store
                    .path_exists(bucket, &folder_key(&resolved))
                    .await?
            }
        };

        if !exists {
            return Err(Error::NotADirectory(with_trailing_delimiter(join_segments(
                &resolved,
            ))));
        }

        self.context.update_path(&target);
        tracing::debug!(path = %self.context, "changed directory");
        Ok(())
    }
}
