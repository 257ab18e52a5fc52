//! Collection creation action
//!
//! Sequence: generate a cover image from the prompt, upload it, upload the
//! collection metadata JSON, then hand both URLs to the wallet to create the
//! collection on chain. Every upstream failure becomes a Failed outcome.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::actions::generate_and_upload_image;
use crate::plugin::{Action, ActionContext, ActionOutcome};
use mintforge_core::constants::{COLLECTION_KEY_PREFIX, DEFAULT_URL_EXPIRY_SECS};
use mintforge_core::models::CollectionDetails;

pub const CREATE_COLLECTION: &str = "CREATE_COLLECTION";

/// Request payload for [`CreateCollectionAction`], templated by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCollectionPayload {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    /// Prompt for the collection cover image.
    pub image_prompt: String,
    /// Royalty share in basis points (100 = 1%).
    #[serde(default)]
    pub seller_fee_basis_points: u16,
    /// Return signed URLs instead of public ones.
    #[serde(default)]
    pub use_signed_urls: bool,
}

#[derive(Debug, Default)]
pub struct CreateCollectionAction;

#[async_trait]
impl Action for CreateCollectionAction {
    fn name(&self) -> &str {
        CREATE_COLLECTION
    }

    fn validate_payload(&self, payload: &serde_json::Value) -> Result<()> {
        serde_json::from_value::<CreateCollectionPayload>(payload.clone())
            .map(|_| ())
            .context("Invalid CREATE_COLLECTION payload")
    }

    async fn execute(&self, context: ActionContext) -> Result<ActionOutcome> {
        let payload: CreateCollectionPayload = serde_json::from_value(context.payload.clone())
            .context("Invalid CREATE_COLLECTION payload")?;

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

        let metadata = json!({
            "name": payload.name,
            "symbol": payload.symbol,
            "description": payload.description,
            "image": image_url,
            "seller_fee_basis_points": payload.seller_fee_basis_points,
        });

        let metadata_upload = context
            .uploader
            .upload_json(
                &metadata,
                None,
                Some(COLLECTION_KEY_PREFIX),
                payload.use_signed_urls,
                expires_in,
            )
            .await;

        if !metadata_upload.success {
            return Ok(ActionOutcome::failed(format!(
                "Collection metadata upload failed: {}",
                metadata_upload
                    .error
                    .unwrap_or_else(|| "unknown error".to_string())
            )));
        }
        let metadata_url = metadata_upload.url.unwrap_or_default();

        let details = CollectionDetails {
            name: payload.name.clone(),
            symbol: payload.symbol,
            description: payload.description,
            seller_fee_basis_points: payload.seller_fee_basis_points,
            image_url: image_url.clone(),
            metadata_url: metadata_url.clone(),
        };

        match context.wallet.create_collection(details).await {
            Ok(created) => {
                tracing::info!(
                    collection = %payload.name,
                    address = %created.address,
                    "Collection created"
                );
                Ok(ActionOutcome::success(json!({
                    "address": created.address,
                    "metadata_url": metadata_url,
                    "image_url": image_url,
                    "signature": created.signature,
                })))
            }
            Err(e) => Ok(ActionOutcome::failed(format!(
                "Collection creation failed: {:#}",
                e
            ))),
        }
    }
}
