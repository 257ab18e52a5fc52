//! Wallet capability
//!
//! Collection creation and minting are delegated wholesale to a wallet
//! backend: transaction construction, signing, confirmation, and on-chain
//! verification all live behind this trait. The plugin only hands over the
//! uploaded artifact URLs and passes the returned records through.

use anyhow::Result;
use async_trait::async_trait;

use mintforge_core::models::{CollectionDetails, CreatedCollection, MintRequest, MintedNft};

/// On-chain minting capability provided by the host.
#[async_trait]
pub trait MintWallet: Send + Sync {
    /// Create a collection from the uploaded metadata.
    async fn create_collection(&self, details: CollectionDetails) -> Result<CreatedCollection>;

    /// Mint a single token into an existing collection.
    async fn mint_nft(&self, request: MintRequest) -> Result<MintedNft>;
}
