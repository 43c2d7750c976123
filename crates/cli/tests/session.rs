//! End-to-end shell sessions over the in-memory store

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use s3fs_cli::dispatcher::Dispatcher;
use s3fs_cli::indicator::{DotIndicator, QuietIndicator};
use s3fs_cli::listener::TextListener;
use s3fs_cli::output::{BufferOutput, Formatter};
use s3fs_cli::session::Session;
use s3fs_core::{MemoryStore, ObjectStore, Operation, Result};

/// Store whose listings take a while, like a remote backend
struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

#[async_trait]
impl ObjectStore for SlowStore {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_buckets().await
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_objects(bucket, prefix).await
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        self.inner.bucket_exists(bucket).await
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        self.inner.object_exists(bucket, key).await
    }

    async fn path_exists(&self, bucket: &str, prefix: &str) -> Result<bool> {
        self.inner.path_exists(bucket, prefix).await
    }

    async fn download_object(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        self.inner.download_object(bucket, key).await
    }

    async fn upload_object(&self, bucket: &str, key: &str, local_file: &Path) -> Result<String> {
        self.inner.upload_object(bucket, key, local_file).await
    }
}

fn store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::new()
            .with_bucket("empty")
            .with_object("bucket", "folder/", Vec::new())
            .with_object("bucket", "folder/subfolder/", Vec::new())
            .with_object("bucket", "folder/subfolder/deep.txt", "deep")
            .with_object("bucket", "folder/index.html", "<html></html>")
            .with_object("bucket", "readme.md", "# readme"),
    )
}

fn session(store: Arc<MemoryStore>) -> (Session, Arc<BufferOutput>) {
    let out = Arc::new(BufferOutput::new());
    let indicator = Arc::new(QuietIndicator::new(out.clone(), None));
    let dispatcher = Dispatcher::new(store, indicator);
    (Session::new(dispatcher, out.clone(), Formatter::new(false)), out)
}

#[tokio::test]
async fn browse_buckets_and_folders() {
    let store = store();
    let (mut session, out) = session(store.clone());

    assert!(session.run_line("ls").await);
    assert!(session.run_line("cd bucket/folder && ls && pwd").await);
    assert!(session.run_line("cd .. && ls").await);

    assert_eq!(
        out.lines(),
        vec![
            "[B] bucket",
            "[B] empty",
            "[F] index.html",
            "[D] subfolder/",
            "bucket/folder/",
            "[D] folder/",
            "[F] readme.md",
        ]
    );
    assert_eq!(store.call_count(Operation::ListBuckets), 1);
    assert_eq!(store.call_count(Operation::ListObjects), 2);
}

#[tokio::test]
async fn failed_navigation_keeps_path() {
    let (mut session, out) = session(store());

    assert!(session.run_line("cd bucket/folder").await);
    assert!(!session.run_line("cd ../missing && pwd").await);
    assert!(session.run_line("pwd").await);

    assert_eq!(
        out.contents(),
        "✗ Cannot change into non-existent directory: bucket/missing/\nbucket/folder/\n"
    );
}

#[tokio::test]
async fn backend_failure_is_reported() {
    let store = store();
    store.fail(Operation::ListObjects);
    let (mut session, out) = session(store);

    assert!(session.run_line("cd empty").await);
    assert!(!session.run_line("ls").await);
    assert_eq!(out.contents(), "✗ ListObjects failed\n");
}

#[tokio::test]
async fn download_and_upload() {
    let store = store();
    let (mut session, out) = session(store.clone());
    let dir = tempfile::tempdir().unwrap();
    let dir_path = dir.path().to_string_lossy().into_owned();

    assert!(
        session
            .run_line(&format!("get bucket/folder/index.html {dir_path}"))
            .await
    );
    let downloaded = dir.path().join("index.html");
    assert_eq!(std::fs::read(&downloaded).unwrap(), b"<html></html>");
    assert!(out.contents().starts_with("File downloaded: "));

    let local = dir.path().join("notes.txt");
    std::fs::write(&local, "notes").unwrap();
    let local = local.to_string_lossy().into_owned();

    assert!(session.run_line(&format!("cd bucket && put {local} folder")).await);
    assert!(session.run_line(&format!("put {local} renamed.txt")).await);

    assert_eq!(store.object("bucket", "folder/notes.txt").unwrap(), b"notes");
    assert_eq!(store.object("bucket", "renamed.txt").unwrap(), b"notes");
    assert!(out.contents().ends_with(
        "File uploaded: bucket/folder/notes.txt\nFile uploaded: bucket/renamed.txt\n"
    ));
}

#[tokio::test]
async fn interactive_session_with_dot_loader() {
    let out = Arc::new(BufferOutput::new());
    let indicator = Arc::new(DotIndicator::new(out.clone(), "> "));
    let dispatcher = Dispatcher::new(store(), indicator.clone());
    let mut session = Session::new(dispatcher, out.clone(), Formatter::new(false));

    let input: &[u8] = b"pwd\ncd bucket\n";
    let mut listener = TextListener::new(input, indicator);
    session.run(&mut listener).await.unwrap();

    // The loader always finishes its line before the next prompt
    let contents = out.contents();
    assert!(contents.starts_with("> /\n> "));
    assert!(contents.ends_with("\n> \n"));
    assert_eq!(session.dispatcher().context().path(), "bucket");
}

#[tokio::test]
async fn dot_loader_line_closes_before_listing() {
    let out = Arc::new(BufferOutput::new());
    let indicator =
        Arc::new(DotIndicator::new(out.clone(), "> ").with_interval(Duration::from_millis(20)));
    let store = Arc::new(SlowStore {
        inner: MemoryStore::new().with_bucket("alpha").with_bucket("beta"),
        delay: Duration::from_millis(120),
    });
    let mut session = Session::new(
        Dispatcher::new(store, indicator),
        out.clone(),
        Formatter::new(false),
    );

    assert!(session.run_line("ls").await);

    let contents = out.contents();
    let (dots, listing) = contents.split_once('\n').unwrap();
    assert!(!dots.is_empty());
    assert!(dots.chars().all(|c| c == '.'));
    assert_eq!(listing, "[B] alpha\n[B] beta\n");
}

#[tokio::test]
async fn invalid_utf8_line_does_not_end_session() {
    let (mut session, out) = session(store());
    let indicator = Arc::new(QuietIndicator::new(out.clone(), None));
    let input: &[u8] = b"cd \xff\nls\n";
    let mut listener = TextListener::new(input, indicator);

    session.run(&mut listener).await.unwrap();

    assert_eq!(
        out.contents(),
        "✗ Cannot change into non-existent directory: \u{FFFD}/\n[B] bucket\n[B] empty\n\n"
    );
}
