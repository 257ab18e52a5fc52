//! Test helpers for action unit tests
//!
//! Mock implementations of the bucket store, image generator, and wallet so
//! actions can be exercised without network or chain dependencies.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::image::{GeneratedImage, ImageGenerator};
use crate::plugin::ActionContext;
use crate::wallet::MintWallet;
use mintforge_core::models::{CollectionDetails, CreatedCollection, MintRequest, MintedNft};
use mintforge_storage::{BucketStore, StorageError, StorageResult, UploadService};

#[derive(Debug, Clone, PartialEq)]
pub struct PutRecord {
    pub key: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Recording in-memory bucket store.
#[derive(Default)]
pub struct MemoryBucketStore {
    puts: Mutex<Vec<PutRecord>>,
}

impl MemoryBucketStore {
    pub fn records(&self) -> Vec<PutRecord> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BucketStore for MemoryBucketStore {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        self.puts.lock().unwrap().push(PutRecord {
            key: key.to_string(),
            content_type: content_type.to_string(),
            body: data.to_vec(),
        });
        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        Ok(format!(
            "https://signed.test/{}?X-Amz-Expires={}",
            key,
            expires_in.as_secs()
        ))
    }
}

/// Bucket store that fails every call.
pub struct FailingBucketStore;

#[async_trait]
impl BucketStore for FailingBucketStore {
    async fn put(&self, _key: &str, _content_type: &str, _data: Bytes) -> StorageResult<()> {
        Err(StorageError::BackendError("simulated outage".to_string()))
    }

    async fn signed_url(&self, _key: &str, _expires_in: Duration) -> StorageResult<String> {
        Err(StorageError::SigningFailed("simulated outage".to_string()))
    }
}

/// Image generator returning a fixed image, or failing on demand.
pub struct MockImageGenerator {
    pub fail: bool,
}

impl MockImageGenerator {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GeneratedImage> {
        if self.fail {
            anyhow::bail!("image backend down");
        }
        Ok(GeneratedImage {
            data: Bytes::from_static(b"fake image bytes"),
            file_name: "generated.png".to_string(),
        })
    }
}

/// Wallet recording every call, or failing on demand.
#[derive(Default)]
pub struct MockWallet {
    pub fail: bool,
    pub collections: Mutex<Vec<CollectionDetails>>,
    pub mints: Mutex<Vec<MintRequest>>,
}

impl MockWallet {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl MintWallet for MockWallet {
    async fn create_collection(&self, details: CollectionDetails) -> Result<CreatedCollection> {
        if self.fail {
            anyhow::bail!("wallet rejected transaction");
        }
        let metadata_url = details.metadata_url.clone();
        self.collections.lock().unwrap().push(details);
        Ok(CreatedCollection {
            address: "COLLECTIONADDR111".to_string(),
            metadata_url,
            signature: Some("sig-collection".to_string()),
        })
    }

    async fn mint_nft(&self, request: MintRequest) -> Result<MintedNft> {
        if self.fail {
            anyhow::bail!("wallet rejected transaction");
        }
        let minted = MintedNft {
            address: "NFTADDR111".to_string(),
            collection_address: request.collection_address.clone(),
            metadata_url: request.metadata_url.clone(),
            signature: Some("sig-mint".to_string()),
        };
        self.mints.lock().unwrap().push(request);
        Ok(minted)
    }
}

/// Build an [`ActionContext`] wired to the given doubles.
pub fn test_context(
    store: Arc<dyn BucketStore>,
    image_generator: Arc<dyn ImageGenerator>,
    wallet: Arc<dyn MintWallet>,
    payload: serde_json::Value,
) -> ActionContext {
    let uploader = UploadService::with_store(store, "test-bucket", "us-east-1", "uploads");
    ActionContext {
        uploader: Arc::new(uploader),
        image_generator,
        wallet,
        payload,
    }
}
