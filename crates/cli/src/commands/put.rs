//! put command - Upload a local file
//!
//! The destination is resolved like any other virtual path. When it names an
//! existing folder, or ends with the delimiter, the file keeps its own name
//! inside that folder. Otherwise the destination is used as the object key.

use s3fs_core::local::{absolute_path, base_name};
use s3fs_core::path::object_key;
use s3fs_core::{Error, ObjectStore, PATH_DELIMITER, PATH_DELIMITER_CHAR, PathContext, Result};

use crate::output::Output;

pub struct Put<'a> {
    context: &'a PathContext,
    store: &'a dyn ObjectStore,
    source: Option<String>,
    destination: Option<String>,
}

impl<'a> Put<'a> {
    pub fn new(
        context: &'a PathContext,
        store: &'a dyn ObjectStore,
        source: Option<String>,
        destination: Option<String>,
    ) -> Self {
        Self {
            context,
            store,
            source,
            destination,
        }
    }

    pub async fn execute(self, out: &dyn Output) -> Result<()> {
        let source = self
            .source
            .as_deref()
            .ok_or(Error::MissingArgument("local file"))?;

        let local = absolute_path(source)?;
        let file = std::fs::File::open(&local)?;
        if file.metadata()?.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::IsADirectory,
                format!("{} is a directory", local.display()),
            )
            .into());
        }
        drop(file);

        let file_name = base_name(&local).ok_or_else(|| Error::NotAFile(source.to_string()))?;

        let destination = self.destination.as_deref().unwrap_or_default();
        let into_folder = destination.ends_with(PATH_DELIMITER_CHAR);
        let resolved = self.context.calculate_path(destination);
        let bucket = resolved.first().ok_or(Error::MissingBucket)?;
        let key = object_key(&resolved);

        let key = if key.is_empty() {
            file_name
        } else if into_folder || self.folder_exists(bucket, &key).await? {
            format!("{key}{PATH_DELIMITER}{file_name}")
        } else {
            key
        };

        let written = self.store.upload_object(bucket, &key, &local).await?;
        out.write(&format!("File uploaded: {bucket}{PATH_DELIMITER}{written}\n"));
        Ok(())
    }

    async fn folder_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        self.store
            .path_exists(bucket, &format!("{key}{PATH_DELIMITER}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::MockStore;
    use crate::output::BufferOutput;
    use s3fs_core::ErrorKind;
    use tempfile::TempDir;

    fn local_file(name: &str) -> (TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, b"payload").unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[tokio::test]
    async fn test_missing_source() {
        let store = MockStore::new();
        let context = PathContext::with_path("bucket");
        let err = Put::new(&context, &store, None, None)
            .execute(&BufferOutput::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing local file.");
    }

    #[tokio::test]
    async fn test_unreadable_source() {
        let mut store = MockStore::new();
        store.expect_upload_object().never();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let context = PathContext::with_path("bucket");
        let err = Put::new(
            &context,
            &store,
            Some(missing.to_string_lossy().into_owned()),
            None,
        )
        .execute(&BufferOutput::new())
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LocalIo);
    }

    #[tokio::test]
    async fn test_root_destination_needs_bucket() {
        let (_dir, path) = local_file("a.txt");
        let store = MockStore::new();
        let context = PathContext::new();
        let err = Put::new(&context, &store, Some(path), None)
            .execute(&BufferOutput::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingBucket));
    }

    #[tokio::test]
    async fn test_bucket_root_uses_file_name() {
        let (_dir, path) = local_file("a.txt");
        let mut store = MockStore::new();
        store.expect_path_exists().never();
        store
            .expect_upload_object()
            .withf(|bucket, key, file| {
                bucket == "bucket" && key == "a.txt" && file.ends_with("a.txt")
            })
            .times(1)
            .returning(|_, key, _| Ok(key.to_string()));

        let context = PathContext::with_path("bucket");
        let out = BufferOutput::new();
        Put::new(&context, &store, Some(path), None)
            .execute(&out)
            .await
            .unwrap();
        assert_eq!(out.contents(), "File uploaded: bucket/a.txt\n");
    }

    #[tokio::test]
    async fn test_existing_folder_keeps_file_name() {
        let (_dir, path) = local_file("report.csv");
        let mut store = MockStore::new();
        store
            .expect_path_exists()
            .withf(|bucket, prefix| bucket == "bucket" && prefix == "folder/")
            .times(1)
            .returning(|_, _| Ok(true));
        store
            .expect_upload_object()
            .withf(|_, key, _| key == "folder/report.csv")
            .times(1)
            .returning(|_, key, _| Ok(key.to_string()));

        let context = PathContext::new();
        let out = BufferOutput::new();
        Put::new(&context, &store, Some(path), Some("bucket/folder".to_string()))
            .execute(&out)
            .await
            .unwrap();
        assert_eq!(out.contents(), "File uploaded: bucket/folder/report.csv\n");
    }

    #[tokio::test]
    async fn test_new_key_is_used_verbatim() {
        let (_dir, path) = local_file("report.csv");
        let mut store = MockStore::new();
        store
            .expect_path_exists()
            .withf(|_, prefix| prefix == "newname.txt/")
            .returning(|_, _| Ok(false));
        store
            .expect_upload_object()
            .withf(|bucket, key, _| bucket == "bucket" && key == "newname.txt")
            .times(1)
            .returning(|_, key, _| Ok(key.to_string()));

        let context = PathContext::with_path("bucket/folder");
        Put::new(&context, &store, Some(path), Some("/bucket/newname.txt".to_string()))
            .execute(&BufferOutput::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_trailing_delimiter_names_new_folder() {
        let (_dir, path) = local_file("report.csv");
        let mut store = MockStore::new();
        store.expect_path_exists().never();
        store
            .expect_upload_object()
            .withf(|bucket, key, _| bucket == "bucket" && key == "newdir/report.csv")
            .times(1)
            .returning(|_, key, _| Ok(key.to_string()));

        let context = PathContext::new();
        let out = BufferOutput::new();
        Put::new(&context, &store, Some(path), Some("bucket/newdir/".to_string()))
            .execute(&out)
            .await
            .unwrap();
        assert_eq!(out.contents(), "File uploaded: bucket/newdir/report.csv\n");
    }

    #[tokio::test]
    async fn test_failing_folder_check_stops_upload() {
        let (_dir, path) = local_file("a.txt");
        let mut store = MockStore::new();
        store
            .expect_path_exists()
            .returning(|_, _| Err(Error::Backend("SlowDown".into())));
        store.expect_upload_object().never();

        let context = PathContext::with_path("bucket");
        let err = Put::new(&context, &store, Some(path), Some("dest".to_string()))
            .execute(&BufferOutput::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Backend);
    }
}
