//! Shared constants

/// Default validity window for signed URLs, in seconds.
pub const DEFAULT_URL_EXPIRY_SECS: u64 = 900;

/// Key prefix for collection metadata uploads.
pub const COLLECTION_KEY_PREFIX: &str = "collections";

/// Key prefix for NFT metadata uploads.
pub const NFT_KEY_PREFIX: &str = "nfts";

/// Settings keys read by the storage upload service.
pub mod settings {
    pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
    pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const AWS_S3_BUCKET: &str = "AWS_S3_BUCKET";
    pub const AWS_S3_UPLOAD_PATH: &str = "AWS_S3_UPLOAD_PATH";

    pub const REPLICATE_API_TOKEN: &str = "REPLICATE_API_TOKEN";
    pub const REPLICATE_IMAGE_MODEL: &str = "REPLICATE_IMAGE_MODEL";
}
