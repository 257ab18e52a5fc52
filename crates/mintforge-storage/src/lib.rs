//! Mintforge Storage Library
//!
//! This crate moves locally generated artifacts (images, metadata JSON) into
//! an S3 bucket and produces retrievable URLs for them.
//!
//! # Storage key format
//!
//! Keys are forward-slash paths assembled from the configured upload prefix,
//! an optional sub-directory, and a filename. Runs of `/` are collapsed to a
//! single slash and keys never start with `/`. When the caller supplies no
//! filename, a millisecond UTC timestamp is embedded in the generated name
//! (`{millis}-{basename}` for files, `{millis}.json` for JSON payloads). Key
//! assembly is centralized in the `keys` module so every entry point stays
//! consistent.

pub(crate) mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod uploader;

// Re-export commonly used types
#[cfg(feature = "storage-s3")]
pub use s3::S3BucketStore;
pub use traits::{BucketStore, StorageError, StorageResult};
pub use uploader::{StorageSettings, UploadResult, UploadService};
