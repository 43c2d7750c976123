//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3fs-core.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use tokio::io::AsyncWriteExt;

use s3fs_core::{ConnectionConfig, Error, ObjectStore, Result};

/// Error codes S3-compatible backends use for a missing bucket or key
const NOT_FOUND_CODES: &[&str] = &["NotFound", "NoSuchBucket", "NoSuchKey"];

/// Maximum keys requested per ListObjectsV2 page
const LIST_PAGE_SIZE: i32 = 1000;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from connection settings
    ///
    /// Static credentials are used when configured, otherwise the default
    /// AWS provider chain (environment, profile, instance metadata).
    pub async fn new(connection: &ConnectionConfig) -> Result<Self> {
        connection.validate()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(connection.region.clone()));

        if let Some((access_key, secret_key)) = connection.static_credentials() {
            let credentials = aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None, // session token
                None, // expiry
                "s3fs-static-credentials",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &connection.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(connection.path_style)
            .build();

        tracing::debug!(
            region = %connection.region,
            endpoint = ?connection.endpoint,
            path_style = connection.path_style,
            "created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Whether the SDK error means the bucket or key does not exist
fn is_not_found<E, R>(err: &SdkError<E, R>) -> bool
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::ServiceError(service) => service
            .err()
            .code()
            .is_some_and(|code| NOT_FOUND_CODES.contains(&code)),
        _ => false,
    }
}

/// Convert an SDK error into a backend error carrying the full error chain
fn backend_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    Error::backend(DisplayErrorContext(err))
}

/// Turn the outcome of a HEAD-style request into an existence answer
fn exists<T, E, R>(result: std::result::Result<T, SdkError<E, R>>) -> Result<bool>
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match result {
        Ok(_) => Ok(true),
        Err(e) if is_not_found(&e) => Ok(false),
        Err(e) => Err(backend_error(e)),
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(backend_error)?;

        Ok(response
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        // Paginate through all results
        loop {
            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .max_keys(LIST_PAGE_SIZE);

            if !prefix.is_empty() {
                request = request.prefix(prefix);
            }

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(backend_error)?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            if !response.is_truncated().unwrap_or(false) {
                break;
            }

            continuation_token = response.next_continuation_token().map(str::to_string);
            if continuation_token.is_none() {
                tracing::warn!(bucket, prefix, "truncated listing without continuation token");
                break;
            }
        }

        tracing::debug!(bucket, prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        exists(self.inner.head_bucket().bucket(bucket).send().await)
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        exists(
            self.inner
                .head_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await,
        )
    }

    async fn path_exists(&self, bucket: &str, prefix: &str) -> Result<bool> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .max_keys(1)
            .send()
            .await;

        match response {
            Ok(output) => Ok(!output.contents().is_empty()),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(backend_error(e)),
        }
    }

    async fn download_object(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(backend_error)?;

        let temp = tempfile::Builder::new().prefix("s3fs-").tempfile()?;
        let (file, path) = temp.keep().map_err(|e| e.error)?;
        let mut file = tokio::fs::File::from_std(file);

        if let Err(e) = write_body(response.body, &mut file).await {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), "failed to remove partial download: {cleanup}");
            }
            return Err(e);
        }

        tracing::debug!(bucket, key, path = %path.display(), "downloaded object");
        Ok(path)
    }

    async fn upload_object(&self, bucket: &str, key: &str, local_file: &Path) -> Result<String> {
        let body = ByteStream::from_path(local_file)
            .await
            .map_err(std::io::Error::other)?;

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);

        if let Some(content_type) = mime_guess::from_path(local_file).first() {
            request = request.content_type(content_type.essence_str());
        }

        request.send().await.map_err(backend_error)?;

        tracing::debug!(bucket, key, file = %local_file.display(), "uploaded object");
        Ok(key.to_string())
    }
}

/// Stream an object body into a local file
async fn write_body(mut body: ByteStream, file: &mut tokio::fs::File) -> Result<()> {
    while let Some(chunk) = body.try_next().await.map_err(Error::backend)? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}
