//! Collection and mint records exchanged with the wallet capability

use serde::{Deserialize, Serialize};

/// Everything the wallet needs to create a collection on chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDetails {
    pub name: String,
    pub symbol: String,
    pub description: String,
    /// Royalty share in basis points (100 = 1%).
    pub seller_fee_basis_points: u16,
    /// URL of the uploaded cover image.
    pub image_url: String,
    /// URL of the uploaded collection metadata JSON.
    pub metadata_url: String,
}

/// Record returned by the wallet after collection creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCollection {
    /// On-chain address of the collection.
    pub address: String,
    pub metadata_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Everything the wallet needs to mint a single token into a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    pub collection_address: String,
    pub name: String,
    /// URL of the uploaded token metadata JSON.
    pub metadata_url: String,
}

/// Record returned by the wallet after a mint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintedNft {
    /// On-chain address of the minted token.
    pub address: String,
    pub collection_address: String,
    pub metadata_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}
