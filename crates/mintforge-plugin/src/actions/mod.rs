//! Action implementations

mod collection;
mod mint;

pub use collection::{CreateCollectionAction, CreateCollectionPayload, CREATE_COLLECTION};
pub use mint::{MintNftAction, MintNftPayload, MINT_NFT};

use anyhow::{Context, Result};
use std::time::Duration;

use crate::plugin::ActionContext;

/// Generate an image for `prompt`, stage it to a scratch file, and upload it.
///
/// Returns the resulting image URL. The scratch directory is removed when the
/// guard drops, after the upload completed.
pub(crate) async fn generate_and_upload_image(
    context: &ActionContext,
    prompt: &str,
    use_signed_url: bool,
    expires_in: Duration,
) -> Result<String> {
    let image = context
        .image_generator
        .generate(prompt)
        .await
        .context("Image generation failed")?;

    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let path = scratch.path().join(&image.file_name);
    tokio::fs::write(&path, &image.data)
        .await
        .context("Failed to stage generated image")?;

    let result = context
        .uploader
        .upload_file(&path, use_signed_url, expires_in)
        .await;

    if !result.success {
        anyhow::bail!(
            "Image upload failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    result
        .url
        .ok_or_else(|| anyhow::anyhow!("Image upload returned no URL"))
}
