//! NFT mint action
//!
//! Sequence: generate the token image from the prompt, upload it, upload the
//! token metadata JSON, then hand the metadata URL to the wallet to mint into
//! the target collection.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::actions::generate_and_upload_image;
use crate::plugin::{Action, ActionContext, ActionOutcome};
use mintforge_core::constants::{DEFAULT_URL_EXPIRY_SECS, NFT_KEY_PREFIX};
use mintforge_core::models::{MintRequest, NftAttribute, NftMetadata};

pub const MINT_NFT: &str = "MINT_NFT";

/// Request payload for [`MintNftAction`], templated by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct MintNftPayload {
    /// Address of the collection the token belongs to.
    pub collection_address: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Prompt for the token image.
    pub image_prompt: String,
    #[serde(default)]
    pub attributes: Vec<NftAttribute>,
    /// Return signed URLs instead of public ones.
    #[serde(default)]
    pub use_signed_urls: bool,
}

#[derive(Debug, Default)]
pub struct MintNftAction;

#[async_trait]
impl Action for MintNftAction {
    fn name(&self) -> &str {
        MINT_NFT
    }

    fn validate_payload(&self, payload: &serde_json::Value) -> Result<()> {
        serde_json::from_value::<MintNftPayload>(payload.clone())
            .map(|_| ())
            .context("Invalid MINT_NFT payload")
    }

    async fn execute(&self, context: ActionContext) -> Result<ActionOutcome> {
        let payload: MintNftPayload = serde_json::from_value(context.payload.clone())
            .context("Invalid MINT_NFT payload")?;

        let expires_in = Duration::from_secs(DEFAULT_URL_EXPIRY_SECS);

        let image_url = match generate_and_upload_image(
            &context,
            &payload.image_prompt,
            payload.use_signed_urls,
            expires_in,
        )
        .await
        {
            Ok(url) => url,
            Err(e) => return Ok(ActionOutcome::failed(format!("{:#}", e))),
        };

        let metadata = NftMetadata::new(
            payload.name.clone(),
            payload.description.clone(),
            image_url.clone(),
        )
        .with_attributes(payload.attributes.clone());

        let metadata_value = match serde_json::to_value(&metadata) {
            Ok(value) => value,
            Err(e) => {
                return Ok(ActionOutcome::failed(format!(
                    "Failed to serialize token metadata: {}",
                    e
                )))
            }
        };

        let metadata_upload = context
            .uploader
            .upload_json(
                &metadata_value,
                None,
                Some(NFT_KEY_PREFIX),
                payload.use_signed_urls,
                expires_in,
            )
            .await;

        if !metadata_upload.success {
            return Ok(ActionOutcome::failed(format!(
                "Token metadata upload failed: {}",
                metadata_upload
                    .error
                    .unwrap_or_else(|| "unknown error".to_string())
            )));
        }
        let metadata_url = metadata_upload.url.unwrap_or_default();

        let request = MintRequest {
            collection_address: payload.collection_address.clone(),
            name: payload.name.clone(),
            metadata_url: metadata_url.clone(),
        };

        match context.wallet.mint_nft(request).await {
            Ok(minted) => {
                tracing::info!(
                    token = %payload.name,
                    address = %minted.address,
                    collection = %minted.collection_address,
                    "NFT minted"
                );
                Ok(ActionOutcome::success(json!({
                    "address": minted.address,
                    "collection_address": minted.collection_address,
                    "metadata_url": metadata_url,
                    "image_url": image_url,
                    "signature": minted.signature,
                })))
            }
            Err(e) => Ok(ActionOutcome::failed(format!("Mint failed: {:#}", e))),
        }
    }
}
