//! s3fs-s3: S3 SDK adapter for the s3fs shell
//!
//! Implements [`s3fs_core::ObjectStore`] on top of aws-sdk-s3. No other
//! crate in the workspace talks to the SDK.

pub mod client;

pub use client::S3Client;
