//! Upload service
//!
//! The public contract of this module is result-as-data: `upload_file` and
//! `upload_json` always return an [`UploadResult`], converting every storage
//! failure into `{ success: false, error }` at this boundary. The one fatal
//! path is construction — missing credentials abort plugin initialization.

use crate::keys::{content_type_for, join_key, timestamped_file_name, timestamped_json_name};
#[cfg(feature = "storage-s3")]
use crate::s3::S3BucketStore;
use crate::traits::{BucketStore, StorageError, StorageResult};
use bytes::Bytes;
use mintforge_core::constants::settings;
use mintforge_core::SettingsSource;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;

/// Settings for the upload service, read once at initialization.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
    /// Path segment prepended to every key. May be empty.
    pub upload_path: String,
}

impl StorageSettings {
    /// Read settings from the host runtime.
    ///
    /// Access key, secret key, region, and bucket are required; a missing or
    /// empty value is a `ConfigError`. The upload path is optional and
    /// defaults to empty.
    pub fn from_settings(source: &dyn SettingsSource) -> StorageResult<Self> {
        Ok(Self {
            access_key_id: required_setting(source, settings::AWS_ACCESS_KEY_ID)?,
            secret_access_key: required_setting(source, settings::AWS_SECRET_ACCESS_KEY)?,
            region: required_setting(source, settings::AWS_REGION)?,
            bucket: required_setting(source, settings::AWS_S3_BUCKET)?,
            upload_path: source
                .get_setting(settings::AWS_S3_UPLOAD_PATH)
                .unwrap_or_default(),
        })
    }
}

fn required_setting(source: &dyn SettingsSource, key: &str) -> StorageResult<String> {
    source
        .get_required(key)
        .ok_or_else(|| StorageError::ConfigError(format!("{} is not configured", key)))
}

/// Outcome of an upload, reported as data.
///
/// Callers must check `success` before using `url`/`key`. `key` is present
/// for JSON uploads, `error` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResult {
    fn uploaded(url: String) -> Self {
        Self {
            success: true,
            url: Some(url),
            key: None,
            error: None,
        }
    }

    fn uploaded_json(key: String, url: String) -> Self {
        Self {
            success: true,
            url: Some(url),
            key: Some(key),
            error: None,
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            key: None,
            error: Some(error.into()),
        }
    }
}

/// Moves local or in-memory content into the bucket and produces URLs.
///
/// Holds only read-only configuration after construction, so one instance is
/// shared behind an `Arc` and concurrent calls are independent. No retries:
/// every backend error is caught once and reported; retrying is the caller's
/// decision.
pub struct UploadService {
    store: Arc<dyn BucketStore>,
    bucket: String,
    region: String,
    upload_path: String,
}

impl UploadService {
    /// Build the service from host settings, backed by S3.
    ///
    /// Fails with `ConfigError` when any required credential is missing —
    /// the fatal initialization path.
    #[cfg(feature = "storage-s3")]
    pub fn from_settings(source: &dyn SettingsSource) -> StorageResult<Self> {
        let cfg = StorageSettings::from_settings(source)?;
        let store = S3BucketStore::new(
            cfg.bucket.clone(),
            cfg.region.clone(),
            cfg.access_key_id,
            cfg.secret_access_key,
        )?;
        Ok(Self::with_store(
            Arc::new(store),
            cfg.bucket,
            cfg.region,
            cfg.upload_path,
        ))
    }

    /// Build the service over an explicit backend.
    pub fn with_store(
        store: Arc<dyn BucketStore>,
        bucket: impl Into<String>,
        region: impl Into<String>,
        upload_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            region: region.into(),
            upload_path: upload_path.into(),
        }
    }

    /// Deterministic public URL for a key in this bucket/region.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }

    /// Upload a local file under `{prefix}/{millis}-{basename}`.
    ///
    /// A nonexistent path reports `"File does not exist"` without touching
    /// the backend. Content type is inferred from the file extension.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        use_signed_url: bool,
        expires_in: Duration,
    ) -> UploadResult {
        let path = path.as_ref();

        if !fs::try_exists(path).await.unwrap_or(false) {
            return UploadResult::failure("File does not exist");
        }

        match self.try_upload_file(path, use_signed_url, expires_in).await {
            Ok(url) => UploadResult::uploaded(url),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "File upload failed");
                UploadResult::failure(e.to_string())
            }
        }
    }

    async fn try_upload_file(
        &self,
        path: &Path,
        use_signed_url: bool,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let data = fs::read(path).await?;

        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let file_name = timestamped_file_name(&base_name);
        let key = join_key([self.upload_path.as_str(), file_name.as_str()]);
        let content_type = content_type_for(&base_name);

        self.store.put(&key, content_type, Bytes::from(data)).await?;
        self.resolve_url(&key, use_signed_url, expires_in).await
    }

    /// Upload a JSON payload under `{prefix}[/{sub_directory}]/{file_name}`.
    ///
    /// The body is the pretty-printed (2-space) serialization, uploaded as
    /// `application/json`. The filename defaults to `{millis}.json`. An
    /// explicit filename reused across calls silently overwrites the prior
    /// object.
    pub async fn upload_json(
        &self,
        data: &serde_json::Value,
        file_name: Option<&str>,
        sub_directory: Option<&str>,
        use_signed_url: bool,
        expires_in: Duration,
    ) -> UploadResult {
        if data.is_null() {
            return UploadResult::failure("JSON data is required");
        }

        let file_name = file_name
            .map(str::to_owned)
            .unwrap_or_else(timestamped_json_name);
        let key = join_key([
            self.upload_path.as_str(),
            sub_directory.unwrap_or(""),
            file_name.as_str(),
        ]);

        match self
            .try_upload_json(&key, data, use_signed_url, expires_in)
            .await
        {
            Ok(url) => UploadResult::uploaded_json(key, url),
            Err(e) => {
                tracing::error!(key = %key, error = %e, "JSON upload failed");
                UploadResult::failure(e.to_string())
            }
        }
    }

    async fn try_upload_json(
        &self,
        key: &str,
        data: &serde_json::Value,
        use_signed_url: bool,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let body = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::UploadFailed(format!("Failed to serialize JSON: {}", e)))?;

        self.store
            .put(key, "application/json", Bytes::from(body))
            .await?;
        self.resolve_url(key, use_signed_url, expires_in).await
    }

    /// Signed URL for an already-existing object at `key`.
    ///
    /// No existence check; the store rejects access to a missing object at
    /// read time.
    pub async fn generate_signed_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.store.signed_url(key, expires_in).await
    }

    async fn resolve_url(
        &self,
        key: &str,
        use_signed_url: bool,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if use_signed_url {
            self.store.signed_url(key, expires_in).await
        } else {
            Ok(self.public_url(key))
        }
    }
}
